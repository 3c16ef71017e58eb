//! Residual CNN for multi-label radiograph classification.

use burn::nn::{
    conv::{Conv2d, Conv2dConfig},
    pool::{
        AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig,
    },
    BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
};
use burn::prelude::*;
use burn::tensor::activation::sigmoid;
use serde::{Deserialize, Serialize};

use cxr_core::SpatialClassifier;

/// Configuration for the [`ChestResNet`] model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChestResNetConfig {
    /// Number of output logits (one per target label).
    pub n_classes: usize,
    /// Number of filters per residual stage.
    pub n_filters: Vec<usize>,
    /// Residual blocks per stage.
    pub blocks_per_stage: usize,
    /// Expected side length of the square input.
    pub input_size: usize,
}

impl Default for ChestResNetConfig {
    fn default() -> Self {
        Self {
            n_classes: 6,
            n_filters: vec![64, 128, 256, 512],
            blocks_per_stage: 2,
            input_size: 224,
        }
    }
}

impl ChestResNetConfig {
    /// Create a new config with the given output width.
    #[must_use]
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            ..Default::default()
        }
    }

    /// Set the expected input side length.
    #[must_use]
    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Set the stage widths.
    #[must_use]
    pub fn with_filters(mut self, n_filters: Vec<usize>) -> Self {
        self.n_filters = n_filters;
        self
    }

    /// Set the number of residual blocks per stage.
    #[must_use]
    pub fn with_blocks_per_stage(mut self, blocks_per_stage: usize) -> Self {
        self.blocks_per_stage = blocks_per_stage;
        self
    }

    /// Initialize the model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ChestResNet<B> {
        ChestResNet::new(self.clone(), device)
    }
}

/// Residual block with two 3x3 convolutions and a skip connection.
#[derive(Module, Debug)]
pub struct ResidualBlock2d<B: Backend> {
    conv1: Conv2d<B>,
    bn1: BatchNorm<B, 2>,
    conv2: Conv2d<B>,
    bn2: BatchNorm<B, 2>,
    shortcut: Option<Conv2d<B>>,
    shortcut_bn: Option<BatchNorm<B, 2>>,
}

impl<B: Backend> ResidualBlock2d<B> {
    /// Create a new residual block.
    ///
    /// The first convolution applies the stride; the shortcut is projected
    /// through a 1x1 convolution whenever channels or resolution change.
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        stride: usize,
        device: &B::Device,
    ) -> Self {
        let conv1 = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_stride([stride, stride])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_bias(false)
            .init(device);
        let bn1 = BatchNormConfig::new(out_channels).init(device);

        let conv2 = Conv2dConfig::new([out_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_bias(false)
            .init(device);
        let bn2 = BatchNormConfig::new(out_channels).init(device);

        let (shortcut, shortcut_bn) = if in_channels != out_channels || stride != 1 {
            let sc = Conv2dConfig::new([in_channels, out_channels], [1, 1])
                .with_stride([stride, stride])
                .with_bias(false)
                .init(device);
            let sc_bn = BatchNormConfig::new(out_channels).init(device);
            (Some(sc), Some(sc_bn))
        } else {
            (None, None)
        };

        Self {
            conv1,
            bn1,
            conv2,
            bn2,
            shortcut,
            shortcut_bn,
        }
    }

    /// Forward pass.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let relu = Relu::new();

        let out = self.conv1.forward(x.clone());
        let out = self.bn1.forward(out);
        let out = relu.forward(out);

        let out = self.conv2.forward(out);
        let out = self.bn2.forward(out);

        let shortcut = if let (Some(ref sc), Some(ref sc_bn)) = (&self.shortcut, &self.shortcut_bn)
        {
            let s = sc.forward(x);
            sc_bn.forward(s)
        } else {
            x
        };

        let out = out + shortcut;
        relu.forward(out)
    }
}

/// Residual CNN for multi-label chest radiograph classification.
///
/// Stem convolution plus four residual stages, global average pooling and
/// a linear head producing one logit per label. Findings are not mutually
/// exclusive, so probabilities come from an independent sigmoid per label
/// rather than a softmax.
#[derive(Module, Debug)]
pub struct ChestResNet<B: Backend> {
    stem_conv: Conv2d<B>,
    stem_bn: BatchNorm<B, 2>,
    stem_pool: MaxPool2d,
    blocks: Vec<ResidualBlock2d<B>>,
    gap: AdaptiveAvgPool2d,
    fc: Linear<B>,
    input_size: usize,
    n_classes: usize,
}

impl<B: Backend> ChestResNet<B> {
    /// Create a new ChestResNet model.
    pub fn new(config: ChestResNetConfig, device: &B::Device) -> Self {
        let stem_width = *config.n_filters.first().unwrap_or(&64);
        let stem_conv = Conv2dConfig::new([3, stem_width], [7, 7])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(3, 3))
            .with_bias(false)
            .init(device);
        let stem_bn = BatchNormConfig::new(stem_width).init(device);
        let stem_pool = MaxPool2dConfig::new([3, 3])
            .with_strides([2, 2])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init();

        let mut blocks = Vec::new();
        let mut in_channels = stem_width;
        for (stage, &out_channels) in config.n_filters.iter().enumerate() {
            for block in 0..config.blocks_per_stage {
                // Stages after the first halve the resolution in their first block
                let stride = if stage > 0 && block == 0 { 2 } else { 1 };
                blocks.push(ResidualBlock2d::new(in_channels, out_channels, stride, device));
                in_channels = out_channels;
            }
        }

        let gap = AdaptiveAvgPool2dConfig::new([1, 1]).init();
        let final_channels = *config.n_filters.last().unwrap_or(&stem_width);
        let fc = LinearConfig::new(final_channels, config.n_classes).init(device);

        Self {
            stem_conv,
            stem_bn,
            stem_pool,
            blocks,
            gap,
            fc,
            input_size: config.input_size,
            n_classes: config.n_classes,
        }
    }

    /// Forward pass through the last residual stage.
    ///
    /// The returned activation is the saliency extractor's target layer.
    pub fn forward_features(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let relu = Relu::new();

        let out = self.stem_conv.forward(x);
        let out = self.stem_bn.forward(out);
        let out = relu.forward(out);
        let mut out = self.stem_pool.forward(out);

        for block in &self.blocks {
            out = block.forward(out);
        }

        out
    }

    /// Forward pass from the target-layer activation to the logits.
    pub fn forward_head(&self, features: Tensor<B, 4>) -> Tensor<B, 2> {
        let out = self.gap.forward(features);
        let [batch, channels, _, _] = out.dims();
        let out = out.reshape([batch, channels]);
        self.fc.forward(out)
    }

    /// Full forward pass returning logits.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        self.forward_head(self.forward_features(x))
    }

    /// Forward pass returning per-label sigmoid probabilities.
    pub fn forward_probs(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        sigmoid(self.forward(x))
    }
}

impl<B: Backend> SpatialClassifier<B> for ChestResNet<B> {
    fn input_side(&self) -> usize {
        self.input_size
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn forward_features(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        ChestResNet::forward_features(self, x)
    }

    fn forward_head(&self, features: Tensor<B, 4>) -> Tensor<B, 2> {
        ChestResNet::forward_head(self, features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_config_defaults() {
        let config = ChestResNetConfig::default();
        assert_eq!(config.n_classes, 6);
        assert_eq!(config.n_filters, vec![64, 128, 256, 512]);
        assert_eq!(config.input_size, 224);
    }

    #[test]
    fn test_forward_shapes_small() {
        let device = Default::default();
        let config = ChestResNetConfig::new(6)
            .with_input_size(64)
            .with_filters(vec![8, 16])
            .with_blocks_per_stage(1);
        let model = config.init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::zeros([1, 3, 64, 64], &device);
        let features = model.forward_features(x.clone());

        // Stem divides by 4, the second stage by 2: 64 -> 16 -> 8
        assert_eq!(features.dims(), [1, 16, 8, 8]);

        let logits = model.forward_head(features);
        assert_eq!(logits.dims(), [1, 6]);

        let probs = model.forward_probs(x);
        assert_eq!(probs.dims(), [1, 6]);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let device = Default::default();
        let config = ChestResNetConfig::new(6)
            .with_input_size(32)
            .with_filters(vec![4, 8])
            .with_blocks_per_stage(1);
        let model = config.init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::ones([1, 3, 32, 32], &device);
        let probs = model.forward_probs(x);
        let values: Vec<f32> = probs
            .into_data()
            .as_slice::<f32>()
            .expect("probability data")
            .to_vec();

        assert_eq!(values.len(), 6);
        for v in values {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_classifier_trait_metadata() {
        let device = Default::default();
        let model = ChestResNetConfig::new(6).init::<TestBackend>(&device);
        assert_eq!(SpatialClassifier::input_side(&model), 224);
        assert_eq!(SpatialClassifier::n_classes(&model), 6);
    }
}
