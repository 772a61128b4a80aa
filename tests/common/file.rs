use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(spec: FileSpec) {
    if let Some(parent) = spec.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(&spec.path, &spec.content).expect("Failed to write file");
}

/// Drop `count` files with generated names and contents into `dir`.
pub fn write_generated_files(dir: &Path, count: usize) -> Vec<FileSpec> {
    use fake::Fake;
    use fake::faker::lorem::en::{Word, Words};

    (0..count)
        .map(|index| {
            let file_name = format!("{}_{}.txt", Word().fake::<String>(), index);
            let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

            let spec = FileSpec::new(dir.join(file_name), file_content);
            write_file(spec.clone());
            spec
        })
        .collect()
}
