//! Core traits for trend segmentation

/// Properties of a segmenter that don't depend on its input
pub trait SegmenterProperties {
    /// Get the name of the segmentation algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Get the minimum number of usable samples for a non-empty result
    fn minimum_sample_size(&self) -> usize;
}

/// Segmenters whose behaviour is driven by a parameter set
pub trait ConfigurableSegmenter {
    type Parameters;

    fn with_parameters(params: Self::Parameters) -> Self;
    fn parameters(&self) -> &Self::Parameters;
    fn set_parameters(&mut self, params: Self::Parameters);
}
