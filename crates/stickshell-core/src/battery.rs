//! Battery voltage interpretation: discharge-curve interpolation and icon
//! bucket selection.

/// One breakpoint of the piecewise-linear discharge curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub volts: f32,
    pub fraction: f32,
}

const fn point(volts: f32, fraction: f32) -> CurvePoint {
    CurvePoint { volts, fraction }
}

/// Measured LiPo discharge breakpoints, strictly decreasing in voltage.
/// The two lowest segments carry half the fraction-span of the others: the
/// cell falls off a cliff near empty, so equal voltage steps are worth
/// less charge there.
pub const BATTERY_CURVE: [CurvePoint; 12] = [
    point(4.13, 1.0),
    point(4.06, 0.9),
    point(3.98, 0.8),
    point(3.92, 0.7),
    point(3.87, 0.6),
    point(3.82, 0.5),
    point(3.79, 0.4),
    point(3.77, 0.3),
    point(3.74, 0.2),
    point(3.68, 0.1),
    point(3.45, 0.05),
    point(3.00, 0.0),
];

/// Maps a battery voltage (volts) to a charge fraction in `[0, 1]`.
/// Clamps above the top breakpoint and below the bottom one; piecewise
/// linear in between, so it is monotonically non-decreasing in voltage.
pub fn percentage_for(volts: f32) -> f32 {
    let top = BATTERY_CURVE[0];
    if volts >= top.volts {
        return top.fraction;
    }

    for pair in BATTERY_CURVE.windows(2) {
        let upper = pair[0];
        let lower = pair[1];
        if volts >= lower.volts {
            let span = upper.volts - lower.volts;
            let t = (volts - lower.volts) / span;
            return lower.fraction + (upper.fraction - lower.fraction) * t;
        }
    }

    0.0
}

/// Battery icon paths by 20 % bucket, discharging set.
pub const BATTERY_ICONS: [&str; 6] = [
    "/res/icons/battery/0.jpg",
    "/res/icons/battery/20.jpg",
    "/res/icons/battery/40.jpg",
    "/res/icons/battery/60.jpg",
    "/res/icons/battery/80.jpg",
    "/res/icons/battery/100.jpg",
];

/// Battery icon paths by 20 % bucket, charging set.
pub const BATTERY_CHARGING_ICONS: [&str; 6] = [
    "/res/icons/battery/charging_0.jpg",
    "/res/icons/battery/charging_20.jpg",
    "/res/icons/battery/charging_40.jpg",
    "/res/icons/battery/charging_60.jpg",
    "/res/icons/battery/charging_80.jpg",
    "/res/icons/battery/charging_100.jpg",
];

/// Bucket index for a charge fraction: percent divided by 20, with exactly
/// 100 % clamped into the last bucket.
pub fn bucket_index(fraction: f32) -> usize {
    let percent = (fraction.clamp(0.0, 1.0) * 100.0) as u32;
    (percent / 20).min(5) as usize
}

/// Icon path for a charge fraction, picking the charging or discharging
/// set.
pub fn icon_for(fraction: f32, charging: bool) -> &'static str {
    let set = if charging {
        &BATTERY_CHARGING_ICONS
    } else {
        &BATTERY_ICONS
    };
    set[bucket_index(fraction)]
}
