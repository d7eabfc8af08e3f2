//! Configuration for embedsphere.
//!
//! Two layers live here:
//!
//! - **Typed component configs** such as [`TsneConfig`], built with
//!   `new()`/`with_*()` and handed to the component that needs them.
//! - **The config file** (`~/.embedsphere/config.ini`), loaded into a
//!   [`ConfigFile`] and editable key by key through [`ConfigKey`].
//!
//! # Example
//!
//! ```
//! use embedsphere::config::{ConfigFile, TsneConfig};
//!
//! let file = ConfigFile::default();
//! let tsne: TsneConfig = file.tsne.to_config();
//! assert_eq!(tsne.seed(), 42);
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod tsne;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ConfigFile, LoggingSettings, MapperSettings, OutputSettings, TsneSettings};
pub use tsne::TsneConfig;
