//! Errors surfaced by [`crate::maximum_flow`], [`crate::minimum_cut`], and
//! the individual solvers.

/// Everything that can go wrong when computing a maximum flow or minimum
/// cut.
///
/// The distilled two-kind error surface (`InvalidArgument`, `Unbounded`)
/// is refined here into one constructor per distinct bad-input shape;
/// callers that only care about the coarser distinction can match on
/// [`FlowError::Unbounded`] versus everything else.
///
/// `N` is unbounded here — `Debug`/`Clone`/`Eq` are required only where
/// the derives below actually need them, not on the type itself, so a
/// function can build a [`FlowResult`] without dragging in `N: Debug`
/// just to name the type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError<N> {
    /// `s == t`.
    #[error("source and sink must be distinct vertices")]
    CoincidentEndpoints,

    /// Either `s` or `t` is not a vertex of the graph.
    #[error("vertex {0:?} is not part of the graph")]
    UnknownVertex(N),

    /// An edge carries a negative capacity under the chosen attribute.
    #[error("edge ({0:?}, {1:?}) has negative capacity")]
    NegativeCapacity(N, N),

    /// `minimum_cut` was called with a `cutoff`, which would make the
    /// returned partition not actually minimum.
    #[error("cutoff is not accepted by minimum_cut")]
    CutoffNotAllowedForMinCut,

    /// `global_relabel_freq` was negative.
    #[error("global_relabel_freq must be non-negative")]
    NegativeGlobalRelabelFreq,

    /// An `s`-`t` path made entirely of infinite-capacity arcs exists, so
    /// the maximum flow is unbounded.
    #[error("flow is unbounded: an s-t path of infinite-capacity edges exists")]
    Unbounded,
}

/// Convenience alias for results produced by this crate's public API.
pub type FlowResult<T, N> = Result<T, FlowError<N>>;
