/// Re-encodes `value` from `source_depth` significant bits to `target_depth` bits.
///
/// Widening replicates the bit pattern into itself, doubling the working depth
/// until it covers the target, so a full-scale input stays full-scale
/// (`normalize(31, 5, 8) == 255`). Narrowing drops the excess low bits.
///
/// A depth of zero on either side yields 0. Shifts past 64 bits yield 0 and
/// anything wider than 64 bits keeps only its low 64 bits.
pub fn normalize(value: u64, source_depth: u32, target_depth: u32) -> u64 {
    if source_depth == 0 || target_depth == 0 {
        return 0;
    }

    let mut value = value;
    let mut depth = source_depth;
    while depth < target_depth {
        value |= value.checked_shl(depth).unwrap_or(0);
        depth = depth.saturating_mul(2);
    }

    if target_depth < depth {
        value = value.checked_shr(depth - target_depth).unwrap_or(0);
    }

    value
}
