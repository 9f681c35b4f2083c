//! Accumulation of point mass contributions onto observation points.
//!
//! Every output element receives `sum_j mass_j * kernel(obs_i, src_j)`, added onto what the
//! buffer already holds. Two iteration orders are provided, they give the same result up to
//! floating point summation order.

use num_traits::{AsPrimitive, Float};
use rayon::prelude::*;
use strum_macros::Display;

use crate::coordinates::PointState;

/// Which set of points drives the outer loop.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum LoopOrder {
    /// One task per observation point summing over every source
    #[strum(serialize = "by_observation")]
    ByObservation,
    /// Sources are split across workers, each keeping a partial output buffer
    #[strum(serialize = "by_source")]
    BySource,
}

impl LoopOrder {
    /// Outer loop over the larger of the two sets.
    pub fn choose(observations: usize, sources: usize) -> Self {
        if observations >= sources {
            LoopOrder::ByObservation
        } else {
            LoopOrder::BySource
        }
    }
}

/// Add the mass weighted kernel contributions of `sources` onto `out`.
///
/// `out` must hold one element per observation and `masses` one per source. The buffer must
/// not be shared with another call while this one runs.
pub fn accumulate<T, K>(
    observations: &[PointState],
    sources: &[PointState],
    masses: &[f64],
    kernel: K,
    order: LoopOrder,
    out: &mut [T],
) where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
    K: Fn(&PointState, &PointState) -> f64 + Sync,
{
    debug_assert_eq!(observations.len(), out.len());
    debug_assert_eq!(sources.len(), masses.len());

    if let ([source], [mass]) = (sources, masses) {
        accumulate_single_source(observations, source, *mass, &kernel, out);
        return;
    }

    match order {
        LoopOrder::ByObservation => {
            accumulate_by_observation(observations, sources, masses, &kernel, out)
        }
        LoopOrder::BySource => accumulate_by_source(observations, sources, masses, &kernel, out),
    }
}

fn accumulate_single_source<T, K>(
    observations: &[PointState],
    source: &PointState,
    mass: f64,
    kernel: &K,
    out: &mut [T],
) where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
    K: Fn(&PointState, &PointState) -> f64 + Sync,
{
    out.par_iter_mut()
        .zip(observations.par_iter())
        .for_each(|(value, obs)| {
            *value = *value + AsPrimitive::<T>::as_(mass * kernel(obs, source));
        });
}

fn accumulate_by_observation<T, K>(
    observations: &[PointState],
    sources: &[PointState],
    masses: &[f64],
    kernel: &K,
    out: &mut [T],
) where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
    K: Fn(&PointState, &PointState) -> f64 + Sync,
{
    out.par_iter_mut()
        .zip(observations.par_iter())
        .for_each(|(value, obs)| {
            for (src, &mass) in sources.iter().zip(masses) {
                *value = *value + AsPrimitive::<T>::as_(mass * kernel(obs, src));
            }
        });
}

fn accumulate_by_source<T, K>(
    observations: &[PointState],
    sources: &[PointState],
    masses: &[f64],
    kernel: &K,
    out: &mut [T],
) where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
    K: Fn(&PointState, &PointState) -> f64 + Sync,
{
    let size = out.len();
    let partial = sources
        .par_iter()
        .zip(masses.par_iter())
        .fold(
            || vec![T::zero(); size],
            |mut buffer, (src, &mass)| {
                for (value, obs) in buffer.iter_mut().zip(observations) {
                    *value = *value + AsPrimitive::<T>::as_(mass * kernel(obs, src));
                }
                buffer
            },
        )
        .reduce_with(|mut left, right| {
            for (value, other) in left.iter_mut().zip(&right) {
                *value = *value + *other;
            }
            left
        });

    if let Some(partial) = partial {
        for (value, contribution) in out.iter_mut().zip(partial) {
            *value = *value + contribution;
        }
    }
}
