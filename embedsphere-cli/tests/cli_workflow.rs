//! Integration tests for the embedsphere CLI.
//!
//! Each test runs the built binary against a scratch directory with its own
//! config file, so nothing is read from or written to the real home
//! directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

/// Scratch directory with a config file that keeps logs inside it.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("logs").join("embedsphere.log");
        fs::write(
            dir.path().join("config.ini"),
            format!("[logging]\nfile = {}\n", log_file.display()),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn config(&self) -> PathBuf {
        self.path("config.ini")
    }

    /// Run a CLI command with this workspace's config.
    fn run(&self, args: &[&str]) -> Output {
        let config = self.config();
        Command::new(env!("CARGO_BIN_EXE_embedsphere"))
            .arg("--config")
            .arg(&config)
            .args(args)
            .env("HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute CLI command")
    }
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("{} failed:\nstdout: {}\nstderr: {}", context, stdout, stderr);
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Thirty rows in two well separated clusters, 4 dimensions each.
fn write_embedding_csv(path: &Path) {
    let mut csv = String::from(",ProductId,Score,embedding\n");
    for row in 0..30 {
        let offset = if row < 15 { 0.0 } else { 50.0 };
        let vector: Vec<String> = (0..4)
            .map(|col| format!("{}", offset + ((row * 7 + col * 3) % 11) as f64 * 0.1))
            .collect();
        csv.push_str(&format!(
            "{},P{:03},{},\"[{}]\"\n",
            row,
            row,
            row % 5 + 1,
            vector.join(", ")
        ));
    }
    fs::write(path, csv).unwrap();
}

#[test]
fn test_map_layout() {
    let ws = Workspace::new();
    let layout = ws.path("layout.json");
    let output = ws.path("out/points.json");
    fs::write(&layout, "[[1.0, 0.0], [2.0, 0.0], [0.0, 1.5]]").unwrap();

    let result = ws.run(&["map", "--layout", path_arg(&layout), "--output", path_arg(&output)]);
    assert_success(&result, "map");

    let points = read_json(&output);
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["lat"], json!(90));
    assert_eq!(points[0]["theta"], json!(0.0));
    assert_eq!(points[1]["lat"], json!(-90));
    assert_eq!(points[2]["lat"], json!(0));
    assert_eq!(points[2]["lng"], json!(90));
}

#[test]
fn test_map_degenerate_layout_policies() {
    let ws = Workspace::new();
    let layout = ws.path("layout.json");
    let output = ws.path("points.json");
    fs::write(&layout, "[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]").unwrap();

    let collapsed = ws.run(&["map", "--layout", path_arg(&layout), "--output", path_arg(&output)]);
    assert_success(&collapsed, "map with collapse");
    let points = read_json(&output);
    let lngs: Vec<i64> = points
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["lng"].as_i64().unwrap())
        .collect();
    assert_eq!(lngs, vec![0, 90, 180, -90]);
    assert!(points.as_array().unwrap().iter().all(|p| p["lat"] == json!(90)));

    let rejected = ws.run(&[
        "map",
        "--layout",
        path_arg(&layout),
        "--output",
        path_arg(&ws.path("rejected.json")),
        "--degenerate",
        "reject",
    ]);
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("same radius"));
    assert!(!ws.path("rejected.json").exists());
}

#[test]
fn test_map_empty_layout_fails() {
    let ws = Workspace::new();
    let layout = ws.path("layout.json");
    fs::write(&layout, "[]").unwrap();

    let result = ws.run(&[
        "map",
        "--layout",
        path_arg(&layout),
        "--output",
        path_arg(&ws.path("points.json")),
    ]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).starts_with("Error:"));
}

#[test]
fn test_index_from_globe_records() {
    let ws = Workspace::new();
    let records = ws.path("globe.json");
    let output = ws.path("index.json");
    fs::write(
        &records,
        json!([
            {"id": 1, "embedding": "[1.0, 0.0]", "theta": 0.0, "phi": 0.0, "lat": 90, "lng": 0},
            {"id": 2, "embedding": "[1.0, 0.0]", "theta": 1.0, "phi": 1.0, "lat": 33, "lng": 57},
            {"id": 3, "embedding": "[0.0, 1.0]", "theta": 2.0, "phi": -1.0, "lat": -25, "lng": -57}
        ])
        .to_string(),
    )
    .unwrap();

    let result = ws.run(&[
        "index",
        "--records",
        path_arg(&records),
        "--query",
        "[2.0, 0.0]",
        "--output",
        path_arg(&output),
    ]);
    assert_success(&result, "index");

    assert_eq!(read_json(&output), json!({"33,57": 1.0, "-25,-57": 0.0}));
}

#[test]
fn test_generate_end_to_end() {
    let ws = Workspace::new();
    let input = ws.path("reviews.csv");
    let public = ws.path("public");
    write_embedding_csv(&input);

    let result = ws.run(&[
        "generate",
        "--input",
        path_arg(&input),
        "--output-dir",
        path_arg(&public),
        "--perplexity",
        "5",
        "--max-iter",
        "250",
    ]);
    assert_success(&result, "generate");

    let records = read_json(&public.join("reviews.json"));
    assert_eq!(records.as_array().unwrap().len(), 30);

    let layout = read_json(&public.join("reviews_tsne.json"));
    assert_eq!(layout.as_array().unwrap().len(), 30);

    let globe = read_json(&public.join("reviews_globe.json"));
    let globe = globe.as_array().unwrap();
    assert_eq!(globe.len(), 30);
    for record in globe {
        let lat = record["lat"].as_i64().unwrap();
        let lng = record["lng"].as_i64().unwrap();
        assert!((-90..=90).contains(&lat));
        assert!((-180..=180).contains(&lng));
        assert!(record.get("theta").is_some());
    }
    // Extremes of the radius range land on the poles
    assert!(globe.iter().any(|r| r["lat"] == json!(90)));
    assert!(globe.iter().any(|r| r["lat"] == json!(-90)));

    let log = fs::read_to_string(ws.path("logs/embedsphere.log")).unwrap();
    assert!(log.contains("Generate pipeline complete"));
}

#[test]
fn test_generate_rejects_large_perplexity() {
    let ws = Workspace::new();
    let input = ws.path("reviews.csv");
    write_embedding_csv(&input);

    let result = ws.run(&[
        "generate",
        "--input",
        path_arg(&input),
        "--output-dir",
        path_arg(&ws.path("public")),
    ]);

    // Default perplexity 15 needs more than 46 rows
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("perplexity"));
}

#[test]
fn test_init_and_config_commands() {
    let ws = Workspace::new();
    let config = ws.path("fresh/config.ini");
    let config_arg = path_arg(&config);

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_embedsphere"))
            .arg("--config")
            .arg(config_arg)
            .args(args)
            .env("HOME", ws.dir.path())
            .output()
            .expect("Failed to execute CLI command")
    };

    assert_success(&run(&["init"]), "init");
    assert!(config.exists());

    let second = run(&["init"]);
    assert_success(&second, "second init");
    assert!(String::from_utf8_lossy(&second.stdout).contains("already exists"));

    assert_success(&run(&["config", "set", "tsne.perplexity", "8"]), "config set");
    let get = run(&["config", "get", "tsne.perplexity"]);
    assert_success(&get, "config get");
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "8");

    let list = run(&["config", "list"]);
    assert_success(&list, "config list");
    let listing = String::from_utf8_lossy(&list.stdout);
    assert!(listing.contains("[mapper]"));
    assert!(listing.contains("degenerate = collapse"));

    let path = run(&["config", "path"]);
    assert_eq!(String::from_utf8_lossy(&path.stdout).trim(), config_arg);

    let bad = run(&["config", "set", "tsne.max_iter", "zero"]);
    assert!(!bad.status.success());

    let unknown = run(&["config", "get", "tsne.learning_rate"]);
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("Unknown configuration key"));
}
