//! These routines are taken from the [geo] crate, modified to better
//! fit our use-case.
//!
//! [geo](https://github.com/georust/geo/blob/eb0cd98f3ccfa226631af23d94d66d214ea66488/geo/src/algorithm/haversine_intermediate.rs)

use crate::constants::MEAN_EARTH_RADIUS_MI;
use geo::{CoordFloat, Point};
use num_traits::{AsPrimitive, FromPrimitive};

/// Evenly spaced points along the great circle from `start` to `end`,
/// both inclusive, no further than `max_step_size` miles apart.
pub struct HaversineIter<T: CoordFloat = f64> {
    params: HaversineParams<T>,
    step_size_mi: T,
    total_points: T,
    current_point: T,
    inverse: T,
}

impl<T: CoordFloat> HaversineIter<T> {
    pub fn new(start: Point<T>, max_step_size: T, end: Point<T>) -> Self
    where
        T: FromPrimitive + AsPrimitive<usize>,
    {
        let params = get_params(&start, &end);
        let HaversineParams { d, .. } = params;
        let total_distance = d * T::from(MEAN_EARTH_RADIUS_MI).unwrap();
        let number_of_points = (total_distance / max_step_size).ceil().max(T::one());
        let step_size_mi = total_distance / number_of_points;

        Self {
            params,
            step_size_mi,
            total_points: number_of_points + T::one(),
            current_point: T::zero(),
            inverse: T::one() / number_of_points,
        }
    }

    /// Distance between consecutive points (miles).
    pub fn step_size_mi(&self) -> T {
        self.step_size_mi
    }
}

impl<T: CoordFloat + AsPrimitive<usize>> Iterator for HaversineIter<T> {
    type Item = Point<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_point < self.total_points {
            let factor = self.current_point * self.inverse;
            self.current_point = self.current_point + T::one();
            Some(get_point(&self.params, factor))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_points.as_() - self.current_point.as_();
        (remaining, Some(remaining))
    }
}

impl<T: CoordFloat + AsPrimitive<usize>> ExactSizeIterator for HaversineIter<T> {
    fn len(&self) -> usize {
        self.total_points.as_() - self.current_point.as_()
    }
}

#[allow(clippy::many_single_char_names)]
struct HaversineParams<T> {
    d: T,
    n: T,
    o: T,
    p: T,
    q: T,
    r: T,
    s: T,
}

#[allow(clippy::many_single_char_names)]
fn get_point<T>(params: &HaversineParams<T>, f: T) -> Point<T>
where
    T: CoordFloat,
{
    let one = T::one();

    let HaversineParams {
        d,
        n,
        o,
        p,
        q,
        r,
        s,
    } = *params;

    let a = ((one - f) * d).sin() / d.sin();
    let b = (f * d).sin() / d.sin();

    let x = a * n + b * o;
    let y = a * p + b * q;
    let z = a * r + b * s;

    let lat = z.atan2(x.hypot(y));
    let lon = y.atan2(x);

    Point::new(lon.to_degrees(), lat.to_degrees())
}

#[allow(clippy::many_single_char_names)]
fn get_params<T>(p1: &Point<T>, p2: &Point<T>) -> HaversineParams<T>
where
    T: CoordFloat + FromPrimitive,
{
    let one = T::one();
    let two = one + one;

    let lat1 = p1.y().to_radians();
    let lon1 = p1.x().to_radians();
    let lat2 = p2.y().to_radians();
    let lon2 = p2.x().to_radians();

    let (lat1_sin, lat1_cos) = lat1.sin_cos();
    let (lat2_sin, lat2_cos) = lat2.sin_cos();
    let (lon1_sin, lon1_cos) = lon1.sin_cos();
    let (lon2_sin, lon2_cos) = lon2.sin_cos();

    let m = lat1_cos * lat2_cos;

    let n = lat1_cos * lon1_cos;
    let o = lat2_cos * lon2_cos;
    let p = lat1_cos * lon1_sin;
    let q = lat2_cos * lon2_sin;

    let k = (((lat1 - lat2) / two).sin().powi(2) + m * ((lon1 - lon2) / two).sin().powi(2)).sqrt();

    let d = two * k.asin();

    HaversineParams {
        d,
        n,
        o,
        p,
        q,
        r: lat1_sin,
        s: lat2_sin,
    }
}
