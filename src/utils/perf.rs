/// Times a block when `config::LOG_PERFORMANCE` is set. Threshold is in microseconds.
/// `trace_time!("label", { .. })` uses a 1 ms threshold.
#[macro_export]
macro_rules! trace_time {
    ($name:expr, $block:block) => {
        $crate::trace_time!($name, 1_000, $block)
    };
    ($name:expr, $threshold_micros:expr, $block:block) => {{
        if $crate::config::LOG_PERFORMANCE {
            let started = std::time::Instant::now();
            let out = $block;
            let took = started.elapsed().as_micros();
            let build = if cfg!(debug_assertions) { "debug" } else { "release" };
            if took > $threshold_micros {
                log::warn!(
                    "SLOW ({} build) {}: {:.3} ms, over {:.3} ms",
                    build,
                    $name,
                    took as f64 / 1000.0,
                    $threshold_micros as f64 / 1000.0
                );
            } else {
                log::debug!("{}: {:.3} ms", $name, took as f64 / 1000.0);
            }
            out
        } else {
            $block
        }
    }};
}
