use std::path::{Path, PathBuf};

use cubetro_core::{DemoError, FrameSink, Image, Result};

/// Writes each presented frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    written: u64,
}

impl PngSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            written: 0,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink for PngSink {
    fn write_frame(&mut self, index: u64, frame: &Image) -> Result<()> {
        let path = self.path_for(index);
        let mut bytes = frame.to_rgba8();
        // A presented frame is opaque whatever alpha the primitives left behind.
        for px in bytes.chunks_exact_mut(4) {
            px[3] = u8::MAX;
        }
        let buffer = image::RgbaImage::from_raw(frame.width(), frame.height(), bytes)
            .ok_or_else(|| DemoError::msg("frame buffer does not match its size"))?;
        buffer
            .save(&path)
            .map_err(|err| DemoError::asset(path.display().to_string(), err.to_string()))?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_numbered_png_files() {
        let dir = std::env::temp_dir().join(format!("cubetro-frames-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut sink = PngSink::new(&dir);

        let mut bytes = vec![0; 4 * 3 * 4];
        bytes[..4].copy_from_slice(&[255, 0, 0, 40]);
        let frame = Image::from_rgba8(4, 3, &bytes).unwrap();
        sink.write_frame(7, &frame).unwrap();

        let written = image::open(dir.join("frame_00007.png")).unwrap().into_rgba8();
        assert_eq!(written.dimensions(), (4, 3));
        assert_eq!(written.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(written.get_pixel(3, 2).0, [0, 0, 0, 255]);
        assert_eq!(sink.written(), 1);
    }
}
