/// Zip packaging of exported frames for upload.
use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Bundles named files into a single deflate-compressed archive.
pub struct ArchiveWriter {
    archive_path: PathBuf,
}

impl ArchiveWriter {
    pub fn new(archive_path: &Path) -> Self {
        Self {
            archive_path: archive_path.to_path_buf(),
        }
    }

    /// Write every file under its bare file name and return the archive size in bytes.
    pub fn bundle(&self, files: &[PathBuf]) -> Result<u64> {
        let mut zip = ZipWriter::new(BufWriter::new(File::create(&self.archive_path)?));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(true);

        for file in files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            zip.start_file(name.as_str(), options)?;
            io::copy(&mut File::open(file)?, &mut zip)?;
            log::debug!("Archived {}", file.display());
        }

        zip.finish()?.flush()?;
        Ok(std::fs::metadata(&self.archive_path)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;

    #[test]
    fn test_bundle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.bin");
        fs::write(&a, "1 a.txt\n").unwrap();
        fs::write(&b, vec![7u8; 4096]).unwrap();

        let archive_path = dir.path().join("bundle.zip");
        let size = ArchiveWriter::new(&archive_path)
            .bundle(&[a.clone(), b.clone()])
            .unwrap();
        assert_eq!(size, fs::metadata(&archive_path).unwrap().len());

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);

        let mut text = String::new();
        archive.by_name("a.txt").unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "1 a.txt\n");

        let mut bytes = Vec::new();
        archive.by_name("b.bin").unwrap().read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![7u8; 4096]);
    }
}
