//! One generation cycle for an external model.

use mannequin_spec::{derive_proportions, CustomizationParams, PartHierarchy};

use crate::asset::ExternalModelAsset;
use crate::customize::{apply_customization_with, CustomizeReport, KeywordClassifier, PartClassifier};
use crate::normalize::{normalize, NormalizeReport, ScaleStrategy};
use crate::playback::AnimationPlayer;

/// A customized, normalized model copy ready to attach.
#[derive(Debug, Clone)]
pub struct PreparedModel {
    pub hierarchy: PartHierarchy,
    pub normalize: NormalizeReport,
    pub customize: CustomizeReport,
    /// Present when the asset has clips; otherwise idle rotation applies.
    pub player: Option<AnimationPlayer>,
}

/// Instantiates, normalizes and customizes an asset, in that order.
///
/// The cached asset itself is never modified.
pub fn prepare_model(
    asset: &ExternalModelAsset,
    params: &CustomizationParams,
    strategy: ScaleStrategy,
) -> PreparedModel {
    prepare_model_with(asset, params, strategy, &KeywordClassifier::default())
}

/// [`prepare_model`] with a custom part classifier.
pub fn prepare_model_with(
    asset: &ExternalModelAsset,
    params: &CustomizationParams,
    strategy: ScaleStrategy,
    classifier: &dyn PartClassifier,
) -> PreparedModel {
    let proportions = derive_proportions(params);
    let mut hierarchy = asset.instantiate();
    let normalize = normalize(
        &mut hierarchy,
        &asset.natural_bounds(),
        proportions.height_scale,
        strategy,
    );
    let customize = apply_customization_with(&mut hierarchy, params, classifier);
    let player = AnimationPlayer::start_all(asset.clips());

    PreparedModel {
        hierarchy,
        normalize,
        customize,
        player,
    }
}
