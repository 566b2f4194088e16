use std::path::PathBuf;
use tracing::warn;

/// Name of the intents catalog inside the data directory.
pub const INTENTS_FILENAME: &str = "intents.json";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Application root directory (where the executable lives).
    pub fn root_dir() -> PathBuf {
        let exe = match std::env::current_exe() {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            }
        };

        #[cfg(debug_assertions)]
        {
            // In development the executable sits in target/debug at the workspace root
            let mut path = exe;
            path.pop(); // exe name
            path.pop(); // debug
            path.pop(); // target

            let core_path = path.join("apps").join("core");
            if core_path.exists() {
                return core_path;
            }
            path
        }

        #[cfg(not(debug_assertions))]
        {
            let mut path = exe;
            path.pop();
            path
        }
    }

    /// Main data directory (./data).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Default location of the intents catalog (./data/intents.json).
    pub fn intents_file() -> PathBuf {
        Self::data_dir().join(INTENTS_FILENAME)
    }
}
