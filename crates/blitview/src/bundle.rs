use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Environment variable naming an on-disk resource directory.
pub const RESOURCES_ENV: &str = "BLITVIEW_RESOURCES";

/// Extensions probed when a resource is looked up by bare name.
const EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Images compiled into the binary, by logical name.
const EMBEDDED: &[(&str, &[u8])] = &[("Lena", include_bytes!("../assets/Lena.png"))];

/// Named resources shipped with the application.
pub trait ResourceBundle {
    /// Encoded bytes of the image called `name`, if the bundle has one.
    fn image_data(&self, name: &str) -> Option<Cow<'_, [u8]>>;
}

/// The application's bundle: embedded images, optionally overridden by files
/// in a resource directory.
#[derive(Debug, Clone)]
pub struct AppBundle {
    dir: Option<PathBuf>,
    embedded: &'static [(&'static str, &'static [u8])],
}

impl AppBundle {
    /// Embedded resources only.
    pub fn new() -> Self {
        Self { dir: None, embedded: EMBEDDED }
    }

    /// Embedded resources, overridden by the directory in `BLITVIEW_RESOURCES`
    /// when it is set.
    pub fn from_env() -> Self {
        match std::env::var_os(RESOURCES_ENV) {
            Some(dir) => Self::new().with_dir(dir),
            None => Self::new(),
        }
    }

    /// Looks in `dir` before falling back to the embedded images.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn read_from_dir(dir: &Path, name: &str) -> Option<Vec<u8>> {
        let candidates = std::iter::once(dir.join(name))
            .chain(EXTENSIONS.iter().map(|ext| dir.join(format!("{name}.{ext}"))));

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match std::fs::read(&path) {
                Ok(bytes) => {
                    log::debug!("resource {name:?} read from {}", path.display());
                    return Some(bytes);
                }
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        None
    }
}

impl Default for AppBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceBundle for AppBundle {
    fn image_data(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        if let Some(bytes) = self.dir.as_deref().and_then(|dir| Self::read_from_dir(dir, name)) {
            return Some(Cow::Owned(bytes));
        }

        self.embedded
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
    }
}
