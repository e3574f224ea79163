use std::str::FromStr;

use tracing::debug;
use triangles_geometry::{Real, Triangle3, Vector3};

use crate::errors::InputError;

const COORDS_PER_TRIANGLE: usize = 9;

/// Parses `N` followed by `N` triangles of nine coordinates each
/// (`ax ay az bx by bz cx cy cz`), separated by any whitespace.
pub fn parse_triangles<T>(input: &str) -> Result<Vec<Triangle3<T>>, InputError>
where
    T: Real + FromStr,
{
    let mut tokens = input.split_whitespace().zip(1..);

    let (count_token, _) = tokens.next().ok_or(InputError::MissingCount)?;
    let expected: usize = count_token
        .parse()
        .map_err(|_| InputError::InvalidCount(count_token.to_string()))?;

    // Never trust the count for the allocation size.
    let available = input.len() / (2 * COORDS_PER_TRIANGLE);
    let mut triangles = Vec::with_capacity(expected.min(available));

    let mut coords = [T::ZERO; COORDS_PER_TRIANGLE];
    while triangles.len() < expected {
        for coord in coords.iter_mut() {
            let Some((token, position)) = tokens.next() else {
                return Err(InputError::Truncated {
                    expected,
                    found: triangles.len(),
                });
            };
            *coord = parse_coordinate(token, position)?;
        }
        let [ax, ay, az, bx, by, bz, cx, cy, cz] = coords;
        triangles.push(Triangle3::new(
            Vector3::new(ax, ay, az),
            Vector3::new(bx, by, bz),
            Vector3::new(cx, cy, cz),
        ));
    }

    if let Some((token, position)) = tokens.next() {
        return Err(InputError::TrailingData {
            token: token.to_string(),
            position,
        });
    }

    debug!(triangles = triangles.len(), "parsed input");
    Ok(triangles)
}

fn parse_coordinate<T>(token: &str, position: usize) -> Result<T, InputError>
where
    T: Real + FromStr,
{
    token
        .parse::<T>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidNumber {
            token: token.to_string(),
            position,
        })
}
