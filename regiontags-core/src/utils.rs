use num_traits::{PrimInt, Unsigned};

///
/// Widen a coordinate for diagnostics. Coordinates wider than 64 bits
/// saturate at `u64::MAX`.
///
pub fn to_u64<I>(value: I) -> u64
where
    I: PrimInt + Unsigned,
{
    value.to_u64().unwrap_or(u64::MAX)
}

///
/// Maximal sub-ranges of `[offset, offset + length)` not covered by any of
/// the given `(offset, length)` spans.
///
/// # Arguments
/// - offset: start of the window
/// - length: length of the window
/// - covered: spans sorted ascending by offset; they may extend past the window
///
/// # Returns
/// - the gaps as `(offset, length)` pairs in ascending order
///
pub fn gaps<I, It>(offset: I, length: I, covered: It) -> Vec<(I, I)>
where
    I: PrimInt + Unsigned,
    It: IntoIterator<Item = (I, I)>,
{
    let end = offset + length;
    let mut cursor = offset;
    let mut result = Vec::new();
    for (o, l) in covered {
        if cursor >= end {
            break;
        }
        let e = o + l;
        if e <= cursor || l == I::zero() {
            continue;
        }
        if o > cursor {
            let gap_end = o.min(end);
            result.push((cursor, gap_end - cursor));
        }
        cursor = cursor.max(e);
    }
    if cursor < end {
        result.push((cursor, end - cursor));
    }
    result
}
