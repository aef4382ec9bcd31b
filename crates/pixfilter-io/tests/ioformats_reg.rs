//! I/O formats regression test
//!
//! Writes synthetic images in every writable format, reads them back
//! through format detection and checks the pixels survive unchanged.

use pixfilter_io::{ImageFormat, read_image, read_image_from_bytes, write_image, write_image_to_bytes};
use pixfilter_test::{RegParams, fixtures};

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    let images = [
        fixtures::gradient(33, 17).expect("gradient"),
        fixtures::checkerboard(8, 8, 3).expect("checkerboard"),
        fixtures::noise(13, 9, 42).expect("noise"),
        fixtures::noise(1, 1, 7).expect("noise 1x1"),
    ];

    // --- Test 1: in-memory write then read ---
    for img in &images {
        for format in [ImageFormat::Bmp, ImageFormat::Png] {
            let bytes = write_image_to_bytes(img, format).expect("encode");
            let back = read_image_from_bytes(&bytes).expect("decode");
            rp.compare_image(img, &back);
        }
    }

    // --- Test 2: through the filesystem ---
    let dir = std::env::temp_dir();
    for format in [ImageFormat::Bmp, ImageFormat::Png] {
        let path = dir.join(format!(
            "ioformats_reg_{}.{}",
            std::process::id(),
            format.extension()
        ));
        write_image(&images[0], &path, format).expect("write file");
        rp.check(
            ImageFormat::from_path(&path) == Some(format),
            "extension maps back to format",
        );
        let back = read_image(&path).expect("read file");
        rp.compare_image(&images[0], &back);
        let _ = std::fs::remove_file(&path);
    }

    rp.write_image(&images[0], ImageFormat::Png).expect("display write");

    assert!(rp.cleanup());
}
