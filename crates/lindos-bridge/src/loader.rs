//! Loading of the native library
//!
//! The artifact is opened once per [`LibraryCell`] with `libloading`, and all
//! six entry points are bound and typed immediately, so an incomplete
//! library fails at acquisition rather than on first use. Acquisition itself
//! emits no log events; boundary diagnostics belong to debug mode.

use crate::config::BridgeConfig;
use crate::error::LoadError;
use crate::types::{symbols, EntryPoints};
use libloading::{Library, Symbol};
use std::fmt;
use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A loaded native library and its bound entry points
///
/// The library is never unloaded: the handle keeps it in a `ManuallyDrop`, so
/// the copied function pointers stay valid for the rest of the process.
pub struct LibraryHandle {
    entry_points: EntryPoints,
    path: Option<PathBuf>,
    _library: Option<ManuallyDrop<Library>>,
}

impl LibraryHandle {
    /// Open the artifact at `path` and bind every entry point
    pub fn open(path: &Path, hint: impl Into<String>) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
                hint: hint.into(),
            });
        }

        // Running the library's initializers is the price of loading it;
        // the path is fixed by configuration, never searched for.
        let library = unsafe { Library::new(path) }.map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let entry_points = unsafe { bind(&library, path)? };

        Ok(Self {
            entry_points,
            path: Some(path.to_path_buf()),
            _library: Some(ManuallyDrop::new(library)),
        })
    }

    /// Open the artifact described by `config`
    pub fn from_config(config: &BridgeConfig) -> Result<Self, LoadError> {
        Self::open(&config.artifact_path(), config.remediation_hint())
    }

    /// Wrap entry points that are already linked into the process
    ///
    /// The pointers must honor the boundary contract and remain valid for the
    /// life of the handle.
    pub fn from_entry_points(entry_points: EntryPoints) -> Self {
        Self {
            entry_points,
            path: None,
            _library: None,
        }
    }

    /// The bound entry points
    pub fn entry_points(&self) -> &EntryPoints {
        &self.entry_points
    }

    /// Path of the loaded artifact (`None` for in-process entry points)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl fmt::Debug for LibraryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryHandle")
            .field("path", &self.path)
            .field("entry_points", &self.entry_points)
            .finish()
    }
}

/// Resolve one symbol and copy out its typed function pointer
unsafe fn symbol<T: Copy>(
    library: &Library,
    path: &Path,
    name: &'static [u8],
) -> Result<T, LoadError> {
    let symbol: Symbol<'_, T> = library.get(name).map_err(|_| LoadError::MissingSymbol {
        path: path.to_path_buf(),
        symbol: symbols::display(name),
    })?;
    Ok(*symbol)
}

/// Bind all entry points of the boundary contract
unsafe fn bind(library: &Library, path: &Path) -> Result<EntryPoints, LoadError> {
    Ok(EntryPoints {
        process: symbol(library, path, symbols::PROCESS)?,
        validate: symbol(library, path, symbols::VALIDATE)?,
        error_message: symbol(library, path, symbols::ERROR_MESSAGE)?,
        string_free: symbol(library, path, symbols::STRING_FREE)?,
        result_free: symbol(library, path, symbols::RESULT_FREE)?,
        set_debug: symbol(library, path, symbols::SET_DEBUG)?,
    })
}

type Loader = Box<dyn Fn() -> Result<LibraryHandle, LoadError> + Send + Sync>;

/// One-time, thread-safe acquisition of a [`LibraryHandle`]
///
/// The first caller runs the loader while concurrent callers block. The
/// outcome, success or failure, is then shared by every later caller.
pub struct LibraryCell {
    loader: Loader,
    slot: OnceLock<Result<LibraryHandle, LoadError>>,
}

impl LibraryCell {
    /// Cell that opens the artifact described by `config`
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_loader(move || LibraryHandle::from_config(&config))
    }

    /// Cell backed by a custom loader
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<LibraryHandle, LoadError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            slot: OnceLock::new(),
        }
    }

    /// Cell already holding `handle`
    pub fn preloaded(handle: LibraryHandle) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(Ok(handle));
        Self {
            loader: Box::new(preloaded_loader),
            slot,
        }
    }

    /// Get the handle, loading it on first use
    pub fn acquire(&self) -> Result<&LibraryHandle, LoadError> {
        self.slot
            .get_or_init(|| (self.loader)())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether a load attempt has completed
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl fmt::Debug for LibraryCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryCell")
            .field("slot", &self.slot.get())
            .finish_non_exhaustive()
    }
}

// The slot of a preloaded cell is always set, so this never runs.
fn preloaded_loader() -> Result<LibraryHandle, LoadError> {
    Err(LoadError::NotFound {
        path: PathBuf::new(),
        hint: "library cell was preloaded".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawResult;
    use std::os::raw::c_char;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    unsafe extern "C" fn process(_: *const c_char) -> RawResult {
        RawResult {
            success: false,
            data: std::ptr::null_mut(),
            error_code: 4,
        }
    }
    unsafe extern "C" fn validate(_: *const c_char) -> i32 {
        0
    }
    unsafe extern "C" fn error_message(_: i32) -> *mut c_char {
        std::ptr::null_mut()
    }
    unsafe extern "C" fn string_free(_: *mut c_char) {}
    unsafe extern "C" fn result_free(_: RawResult) {}
    unsafe extern "C" fn set_debug(_: bool) {}

    fn entry_points() -> EntryPoints {
        EntryPoints {
            process,
            validate,
            error_message,
            string_free,
            result_free,
            set_debug,
        }
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::with_project_root(dir.path());

        let error = LibraryHandle::from_config(&config).unwrap_err();
        match &error {
            LoadError::NotFound { path, hint } => {
                assert_eq!(path, &config.artifact_path());
                assert!(hint.contains("cargo build --release"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(error.to_string().contains(&config.artifact_path().display().to_string()));
    }

    #[test]
    fn test_unloadable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liblindos_core.so");
        std::fs::write(&path, b"not a shared object").unwrap();

        let error = LibraryHandle::open(&path, "").unwrap_err();
        assert!(matches!(error, LoadError::Open { .. }));
        assert_eq!(error.path(), &path);
    }

    #[test]
    fn test_acquire_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cell = LibraryCell::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(LibraryHandle::from_entry_points(entry_points()))
        });

        assert!(!cell.is_initialized());
        let first = cell.acquire().unwrap();
        let second = cell.acquire().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cell.is_initialized());
        assert!(first.path().is_none());
    }

    #[test]
    fn test_failure_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cell = LibraryCell::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(LoadError::NotFound {
                path: PathBuf::from("/nowhere/liblindos_core.so"),
                hint: "build it".to_string(),
            })
        });

        let first = cell.acquire().unwrap_err();
        let second = cell.acquire().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_use() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cell = Arc::new(LibraryCell::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(LibraryHandle::from_entry_points(entry_points()))
        }));

        let addresses: Vec<usize> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                std::thread::spawn(move || cell.acquire().unwrap() as *const LibraryHandle as usize)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_preloaded_cell() {
        let cell = LibraryCell::preloaded(LibraryHandle::from_entry_points(entry_points()));
        assert!(cell.is_initialized());
        assert!(cell.acquire().is_ok());
    }
}
