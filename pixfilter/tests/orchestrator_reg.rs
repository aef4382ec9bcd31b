//! Orchestrator regression test
//!
//! Runs every filter kind by name through `run_filter` and checks the
//! cross-filter identities that hold between them.

use pixfilter::{
    FilterKind, FilterParams, Image, Kernel, NoProgress, Outcome, WorkerError, WorkerResult,
    build_filter, run_filter,
};
use pixfilter_test::{RegParams, fixtures};

fn completed(outcome: WorkerResult<Outcome>) -> Image {
    outcome
        .expect("filter error")
        .into_image()
        .expect("pass completed")
}

fn run(kind: FilterKind, params: &FilterParams, img: &Image) -> Image {
    completed(run_filter(kind, params, img, &NoProgress))
}

#[test]
fn orchestrator_reg() {
    let mut rp = RegParams::new("orchestrator");

    let noise = fixtures::noise(24, 18, 77).expect("noise");
    let params = FilterParams {
        kernel: Some(Kernel::parse("0 1 0\n1 1 1\n0 1 0\n").expect("cross")),
        seed: Some(5),
        ..FilterParams::default()
    };

    // --- Test 1: every kind runs and keeps dimensions ---
    for kind in FilterKind::ALL {
        let out = run(kind, &params, &noise);
        rp.check(out.dimensions() == noise.dimensions(), kind.name());
    }

    // --- Test 2: kind names parse back ---
    for kind in FilterKind::ALL {
        rp.check(kind.name().parse::<FilterKind>() == Ok(kind), kind.name());
    }

    // --- Test 3: morphology identities ---
    let dilated = run(FilterKind::Dilation, &params, &noise);
    let eroded = run(FilterKind::Erosion, &params, &noise);
    rp.compare_image(
        &run(FilterKind::Opening, &params, &noise),
        &run(FilterKind::Dilation, &params, &eroded),
    );
    rp.compare_image(
        &run(FilterKind::Closing, &params, &noise),
        &run(FilterKind::Erosion, &params, &dilated),
    );
    rp.compare_image(&eroded, &run(FilterKind::TopHat, &params, &noise));

    // --- Test 4: built-in kernels match explicit convolution ---
    let sharpen = FilterParams {
        kernel: Some(Kernel::sharpen()),
        ..FilterParams::default()
    };
    rp.compare_image(
        &run(FilterKind::Sharpen, &params, &noise),
        &run(FilterKind::Convolve, &sharpen, &noise),
    );
    let identity = FilterParams {
        kernel: Some(Kernel::identity()),
        ..FilterParams::default()
    };
    rp.compare_image(&noise, &run(FilterKind::Convolve, &identity, &noise));

    // --- Test 5: seeded glass is reproducible through the orchestrator ---
    rp.compare_image(
        &run(FilterKind::Glass, &params, &noise),
        &run(FilterKind::Glass, &params, &noise),
    );

    // --- Test 6: missing kernel fails before any pass ---
    let bare = FilterParams::default();
    rp.check(
        matches!(
            build_filter(FilterKind::Opening, &bare, &noise),
            Err(WorkerError::MissingKernel(FilterKind::Opening))
        ),
        "opening without kernel",
    );

    assert!(rp.cleanup());
}
