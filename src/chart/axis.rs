//! Y-axis scaling and tick labels.

/// Human-readable magnitude: `2.5M`, `15K`, `999`.
///
/// Millions keep one decimal, thousands none; both round half to even.
#[allow(clippy::cast_precision_loss)]
pub fn format_magnitude(value: u64) -> String {
    let v = value as f64;
    if value >= 1_000_000 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.0}K", v / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Evenly spaced ticks from 0 covering `max`, stepping by 1, 2 or 5 × 10ⁿ.
///
/// Always returns at least `[0, 1]` so an all-zero chart still has a scale.
pub fn nice_ticks(max: u64) -> Vec<u64> {
    const TARGET_INTERVALS: u64 = 5;

    if max == 0 {
        return vec![0, 1];
    }
    let raw = max.div_ceil(TARGET_INTERVALS);
    let mut magnitude = 1u64;
    while magnitude <= raw / 10 {
        magnitude *= 10;
    }
    let step = [1, 2, 5, 10]
        .into_iter()
        .map(|m| magnitude.saturating_mul(m))
        .find(|s| *s >= raw)
        .unwrap_or(raw);
    let top = max.div_ceil(step).saturating_mul(step);

    let mut ticks = Vec::new();
    let mut tick = 0u64;
    loop {
        ticks.push(tick);
        if tick >= top {
            break;
        }
        tick = tick.saturating_add(step);
    }
    ticks
}
