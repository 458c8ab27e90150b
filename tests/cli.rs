use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use assert_fs::TempDir;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use rstest::*;

macro_rules! cargo_run {
    ($cmd:expr, $($args:expr),*) => {
        {
            let mut cmd = Command::cargo_bin($cmd)?;
            $(cmd.arg($args);)*
            cmd.assert()
        }
    };
}

struct Workspace {
    conf_dir: TempDir,
    image_dir: TempDir,
}

#[fixture]
fn workspace() -> Workspace {
    let image_dir = TempDir::new().unwrap();
    let colors = [("blue.png", [0, 0, 255]), ("green.png", [0, 255, 0]), ("red.png", [255, 0, 0])];
    for (name, color) in colors {
        RgbImage::from_pixel(2, 2, Rgb(color)).save(image_dir.path().join(name)).unwrap();
    }
    Workspace { conf_dir: TempDir::new().unwrap(), image_dir }
}

fn build(ws: &Workspace) -> Result<()> {
    cargo_run!("histsearch", "-c", ws.conf_dir.path(), "build", "-i", ws.image_dir.path())
        .success();
    Ok(())
}

#[rstest]
fn build_and_search(workspace: Workspace) -> Result<()> {
    build(&workspace)?;
    assert!(workspace.conf_dir.path().join("index.bin").is_file());

    let red = workspace.image_dir.path().join("red.png");
    let output = cargo_run!("histsearch", "-c", workspace.conf_dir.path(), "search", &red).success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    let lines = stdout.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("2\t1.000000\t{}", red.display()));
    assert!(lines[1].starts_with("0\t0.000000\t"));

    Ok(())
}

#[rstest]
fn search_count_and_json(workspace: Workspace) -> Result<()> {
    build(&workspace)?;
    let green = workspace.image_dir.path().join("green.png");

    let output = cargo_run!(
        "histsearch",
        "-c",
        workspace.conf_dir.path(),
        "search",
        &green,
        "--count",
        "1",
        "--output-format",
        "json"
    )
    .success();
    let result: serde_json::Value = serde_json::from_slice(&output.get_output().stdout)?;
    let result = result.as_array().unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["id"], 1);
    assert_eq!(result[0]["score"], 1.0);

    Ok(())
}

#[rstest]
fn custom_index_file(workspace: Workspace) -> Result<()> {
    let conf = workspace.conf_dir.path();
    let images = workspace.image_dir.path();
    cargo_run!("histsearch", "-c", conf, "--index-file", "colors.idx", "build", "-i", images)
        .success();
    assert!(conf.join("colors.idx").is_file());

    let blue = workspace.image_dir.path().join("blue.png");
    cargo_run!("histsearch", "-c", conf, "--index-file", "colors.idx", "search", &blue)
        .success()
        .stdout(predicate::str::starts_with("0\t1.000000"));

    Ok(())
}

#[rstest]
fn search_missing_image(workspace: Workspace) -> Result<()> {
    build(&workspace)?;
    let missing = workspace.image_dir.path().join("missing.png");
    cargo_run!("histsearch", "-c", workspace.conf_dir.path(), "search", missing)
        .failure()
        .stderr(predicate::str::contains("找不到图片"));
    Ok(())
}

#[rstest]
fn search_without_index(workspace: Workspace) -> Result<()> {
    let red = workspace.image_dir.path().join("red.png");
    cargo_run!("histsearch", "-c", workspace.conf_dir.path(), "search", red)
        .failure()
        .stderr(predicate::str::contains("找不到索引文件"));
    Ok(())
}

#[rstest]
fn build_missing_dir(workspace: Workspace) -> Result<()> {
    let missing = workspace.image_dir.path().join("missing");
    cargo_run!("histsearch", "-c", workspace.conf_dir.path(), "build", "-i", missing)
        .failure()
        .stderr(predicate::str::contains("找不到图片目录"));
    Ok(())
}

#[rstest]
fn build_skip_errors(workspace: Workspace) -> Result<()> {
    let conf = workspace.conf_dir.path();
    let images = workspace.image_dir.path();
    std::fs::write(images.join("broken.jpg"), b"nope")?;

    cargo_run!("histsearch", "-c", conf, "build", "-i", images).failure();
    assert!(!conf.join("index.bin").exists());
    cargo_run!("histsearch", "-c", conf, "build", "-i", images, "--skip-errors").success();

    let red = images.join("red.png");
    cargo_run!("histsearch", "-c", conf, "search", red)
        .success()
        .stdout(predicate::str::contains("broken.jpg").not());
    Ok(())
}

#[rstest]
fn show_image(workspace: Workspace) -> Result<()> {
    let red = workspace.image_dir.path().join("red.png");
    cargo_run!("histsearch", "show", red)
        .success()
        .stdout(predicate::str::contains("R\tmean=255.00\tbins=1\t255:100.00%"))
        .stdout(predicate::str::contains("G\tmean=0.00\tbins=1\t0:100.00%"));
    Ok(())
}

#[rstest]
fn export_histograms(workspace: Workspace) -> Result<()> {
    build(&workspace)?;
    let output = workspace.conf_dir.path().join("out.npy");
    cargo_run!("histsearch", "-c", workspace.conf_dir.path(), "export", "-o", &output)
        .success()
        .stdout(predicate::str::contains("2\t"));

    let data: ndarray::Array2<f64> = ndarray_npy::read_npy(&output)?;
    assert_eq!(data.dim(), (3, 768));
    assert_eq!(data[[2, 255]], 1.0);
    Ok(())
}
