use crate::touch::types::TouchPoint;

pub(super) fn squared_distance(a: TouchPoint, b: TouchPoint) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

pub(super) fn squared_i64(value: i32) -> i64 {
    i64::from(value).saturating_mul(i64::from(value))
}

/// Integer euclidean distance, saturated to `i32`.
pub(super) fn distance(a: TouchPoint, b: TouchPoint) -> i32 {
    let root = int_sqrt_i64(squared_distance(a, b));
    root.min(i64::from(i32::MAX)) as i32
}

pub(super) fn int_sqrt_i64(value: i64) -> i64 {
    if value <= 0 {
        return 0;
    }
    let mut lo = 0i64;
    let mut hi = value.min(3_037_000_499) + 1;
    while lo + 1 < hi {
        let mid = lo + (hi - lo) / 2;
        if mid.saturating_mul(mid) <= value {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
