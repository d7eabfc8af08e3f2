//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use super::keys::path_to_display;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[tsne]
; Perplexity: roughly the number of neighbours each point attends to (default: 15)
; Must satisfy 3 * perplexity < rows - 1
perplexity = {}
; Seed for the random initial layout. The same seed and input give the same layout (default: 42)
seed = {}
; Gradient descent iterations (default: 1000)
max_iter = {}

[mapper]
; What to do when every point lies at the same distance from the origin:
;   collapse - place all points at the north pole (theta = 0), keep their longitude
;   reject   - fail with an error
degenerate = {}

[output]
; Directory for generated JSON files (default: public)
directory = {}
; Placement fields added to each globe record:
;   full   - theta, phi, lat, lng
;   latlng - lat, lng
fields = {}

[logging]
; Log file location (default: ~/.embedsphere/embedsphere.log)
file = {}
"#,
        config.tsne.perplexity,
        config.tsne.seed,
        config.tsne.max_iter,
        config.mapper.degenerate,
        path_to_display(&config.output.directory),
        config.output.fields,
        path_to_display(&config.logging.file),
    )
}
