use crate::areas::refs::Refs;
use crate::areas::staging::StagingLog;
use crate::areas::store::ObjectStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;

/// Handle to one repository on disk. Owns the content store, the staging
/// log and the branch references; every operation goes through an explicit
/// handle, and there is no ambient repository state anywhere.
///
/// Single-actor model: no locking is provided, and concurrent mutation from
/// several handles can corrupt the staging log's last-segment invariant.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    store: ObjectStore,
    staging: StagingLog,
    workspace: Workspace,
    refs: Refs,
    /// Tree digest recorded by the head commit. Cached when the handle is
    /// opened and kept current by commit/checkout, so the no-op commit
    /// guard never re-reads object contents. Only catches immediate
    /// repeats of the head state.
    head_tree: RefCell<Option<ObjectId>>,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let control_path = path.join(".keep");
        let store = ObjectStore::new(control_path.join("objects").into_boxed_path());
        let staging = StagingLog::new(control_path.join("stage").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(control_path.into_boxed_path());

        let repository = Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            store,
            staging,
            workspace,
            refs,
            head_tree: RefCell::new(None),
        };
        repository.refresh_head_tree()?;

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn staging(&self) -> &StagingLog {
        &self.staging
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Whether `init` has run here: the control directory's HEAD exists.
    pub fn is_initialized(&self) -> bool {
        self.refs.head_path().exists()
    }

    pub fn head_tree(&self) -> Ref<'_, Option<ObjectId>> {
        self.head_tree.borrow()
    }

    pub(crate) fn set_head_tree(&self, tree_oid: Option<ObjectId>) {
        *self.head_tree.borrow_mut() = tree_oid;
    }

    /// Reload the cached head tree digest from the active branch tip.
    pub fn refresh_head_tree(&self) -> anyhow::Result<()> {
        let tree_oid = if self.is_initialized() {
            match self.refs.read_head()? {
                Some(head_oid) => Some(self.store.parse_commit(&head_oid)?.tree().clone()),
                None => None,
            }
        } else {
            None
        };

        self.set_head_tree(tree_oid);
        Ok(())
    }

    /// The tree builder: freeze the current staging segment into a tree
    /// object and return its digest. An empty segment yields no tree, since
    /// there is nothing to commit. Identical snapshots collapse to the same
    /// digest through the store's write-once semantics.
    pub fn write_tree(&self) -> anyhow::Result<Option<ObjectId>> {
        let segment = self.staging.current_segment()?;

        if segment.is_empty() {
            return Ok(None);
        }

        let tree = Tree::build(&segment);
        Ok(Some(self.store.store(&tree)?))
    }
}
