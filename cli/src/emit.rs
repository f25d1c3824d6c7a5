//! Emission of the C declaration/definition pair for a packed bitmap.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use monobitmap::BitmapArtifact;
use tracing::{debug, info};

/// Write `<base>.h` and `<base>.c` for the packed bitmap.
///
/// Each file is written to a `.tmp` sibling and renamed into place once
/// complete, so a failed run leaves no partial artifact behind.
pub fn write_artifacts(base: &Path, artifact: &BitmapArtifact) -> io::Result<()> {
    let header_path = base.with_extension("h");
    let source_path = base.with_extension("c");

    // The definition includes the header by file name; the output base may
    // carry a directory prefix that does not belong in an #include.
    let header_name = header_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bitmap.h".to_string());

    write_atomic(&header_path, |w| write_header(w, artifact))?;
    info!(path = %header_path.display(), "Wrote header file");

    write_atomic(&source_path, |w| write_source(w, &header_name, artifact))?;
    info!(path = %source_path.display(), "Wrote source file");

    Ok(())
}

fn write_atomic<F>(path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let tmp = tmp_path(path);
    debug!(path = %tmp.display(), "Writing temporary file");

    let mut writer = BufWriter::new(File::create(&tmp)?);
    if let Err(err) = fill(&mut writer).and_then(|()| writer.flush()) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    drop(writer);

    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Declaration artifact: the extern array the firmware links against.
fn write_header<W: Write>(w: &mut W, artifact: &BitmapArtifact) -> io::Result<()> {
    let grid = &artifact.grid;
    write!(
        w,
        "extern uint8_t {}[{}][{}];",
        artifact.name,
        grid.pages(),
        grid.width()
    )
}

/// Definition artifact: array storage plus an `initImage` routine that
/// assigns every element its packed byte, page-major then column-major.
fn write_source<W: Write>(
    w: &mut W,
    header_name: &str,
    artifact: &BitmapArtifact,
) -> io::Result<()> {
    let grid = &artifact.grid;
    let name = &artifact.name;

    writeln!(w, "#include \"{header_name}\"")?;
    writeln!(w)?;
    writeln!(w, "uint8_t {}[{}][{}];", name, grid.pages(), grid.width())?;
    writeln!(w, "void initImage() {{")?;
    for page in 0..grid.pages() {
        for x in 0..grid.width() {
            writeln!(w, "\t\t{}[{}][{}] = {};", name, page, x, grid.byte(page, x))?;
        }
    }
    write!(w, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use monobitmap::pack_pages;

    /// 2x12 artifact with a recognizable byte pattern.
    fn create_artifact(name: &str) -> BitmapArtifact {
        let mut img = GrayImage::new(2, 12);
        for y in 0..12 {
            img.put_pixel(0, y, Luma([if y % 2 == 0 { 255 } else { 0 }]));
            img.put_pixel(1, y, Luma([255]));
        }
        BitmapArtifact {
            name: name.to_string(),
            grid: pack_pages(&img),
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(fill: F) -> String {
        let mut buf = Vec::new();
        fill(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_declaration() {
        let artifact = create_artifact("logo");
        let text = render(|w| write_header(w, &artifact));
        assert_eq!(text, "extern uint8_t logo[2][2];");
    }

    #[test]
    fn test_source_layout() {
        let artifact = create_artifact("logo");
        let text = render(|w| write_source(w, "logo.h", &artifact));

        let expected = "#include \"logo.h\"\n\
                        \n\
                        uint8_t logo[2][2];\n\
                        void initImage() {\n\
                        \t\tlogo[0][0] = 85;\n\
                        \t\tlogo[0][1] = 255;\n\
                        \t\tlogo[1][0] = 5;\n\
                        \t\tlogo[1][1] = 15;\n\
                        }";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_artifacts_written_and_no_temp_left() {
        let dir = std::env::temp_dir().join(format!("img2oled-emit-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let base = dir.join("logo");

        let artifact = create_artifact("logo");
        write_artifacts(&base, &artifact).unwrap();

        let header = fs::read_to_string(dir.join("logo.h")).unwrap();
        assert_eq!(header, "extern uint8_t logo[2][2];");

        let source = fs::read_to_string(dir.join("logo.c")).unwrap();
        assert!(source.starts_with("#include \"logo.h\"\n"));
        assert!(source.ends_with("}"));

        assert!(!dir.join("logo.h.tmp").exists());
        assert!(!dir.join("logo.c.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_include_uses_file_name_only() {
        let artifact = create_artifact("boot");
        let dir = std::env::temp_dir().join(format!("img2oled-inc-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        write_artifacts(&dir.join("boot"), &artifact).unwrap();
        let source = fs::read_to_string(dir.join("boot.c")).unwrap();
        assert!(source.starts_with("#include \"boot.h\"\n"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
