//! Kernel regression test
//!
//! Parses kernel text in the authoring format and checks the built-in
//! kernels against their defining formulas.

use pixfilter_core::{Error, Kernel};
use pixfilter_test::RegParams;

#[test]
fn kernel_reg() {
    let mut rp = RegParams::new("kernel");

    // --- Test 1: text parsing ---
    let k = Kernel::parse("1 2\n3 4\n").expect("parse 2x2");
    rp.compare_values(2.0, k.width() as f64, 0.0);
    rp.compare_values(2.0, k.height() as f64, 0.0);
    for (i, &v) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
        rp.compare_values(v, k.data()[i] as f64, 0.0);
    }

    let k = Kernel::parse("1 2 3\n4 5 6\n7 8 9\n").expect("parse 3x3");
    rp.compare_values(3.0, k.width() as f64, 0.0);
    rp.compare_values(3.0, k.height() as f64, 0.0);
    // Line 3 is x = 2, its second value y = 1
    rp.compare_values(8.0, k.get(2, 1).unwrap_or(0.0) as f64, 0.0);

    // Windows line endings give the same kernel
    let crlf = Kernel::parse("1 2 3\r\n4 5 6\r\n7 8 9\r\n").expect("parse crlf");
    rp.check(crlf == k, "crlf kernel equals lf kernel");

    // A single line spans y
    let line = Kernel::parse("1 1 1 1 1").expect("parse line");
    rp.compare_values(1.0, line.width() as f64, 0.0);
    rp.compare_values(5.0, line.height() as f64, 0.0);

    // Non-square: one x per line
    let wide = Kernel::parse("1 2 3\n4 5 6\n").expect("parse 2x3");
    rp.compare_values(2.0, wide.width() as f64, 0.0);
    rp.compare_values(3.0, wide.height() as f64, 0.0);
    rp.compare_values(5.0, wide.get(1, 1).unwrap_or(0.0) as f64, 0.0);

    // --- Test 2: parse failures ---
    rp.check(
        matches!(Kernel::parse("1 2\n3 a\n"), Err(Error::KernelParse(_))),
        "non-numeric token rejected",
    );
    rp.check(
        matches!(Kernel::parse("1 2\n3\n4 5 6\n"), Err(Error::KernelParse(_))),
        "ragged total rejected",
    );
    rp.check(
        matches!(Kernel::parse("1 2 3 4\n5 6\n"), Err(Error::KernelParse(_))),
        "ragged lines with divisible total rejected",
    );
    rp.check(
        matches!(Kernel::parse(""), Err(Error::KernelParse(_))),
        "empty text rejected",
    );

    // --- Test 3: gaussian normalization ---
    for radius in 0..=6 {
        for &sigma in &[0.3f32, 1.0, 2.0, 5.0] {
            let g = Kernel::gaussian(radius, sigma).expect("gaussian");
            rp.compare_values(1.0, g.sum() as f64, 1e-4);
            rp.compare_values((2 * radius + 1) as f64, g.height() as f64, 0.0);
        }
    }

    // --- Test 4: fixed kernels ---
    rp.compare_values(1.0, Kernel::sharpen().sum() as f64, 1e-6);
    rp.compare_values(0.0, Kernel::sobel_x().sum() as f64, 0.0);
    rp.compare_values(0.0, Kernel::sobel_y().sum() as f64, 0.0);
    rp.compare_values(0.0, Kernel::emboss().sum() as f64, 0.0);
    rp.compare_values(1.0, Kernel::box_blur().sum() as f64, 1e-6);
    let motion = Kernel::motion_blur(10).expect("motion blur");
    rp.compare_values(1.0, motion.sum() as f64, 1e-5);
    rp.compare_values(0.1, motion.get(9, 9).unwrap_or(0.0) as f64, 1e-6);

    assert!(rp.cleanup());
}
