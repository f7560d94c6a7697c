//! Avatar session: strategy selection, asset cache, load races and the frame
//! loop.
//!
//! A session owns the current parameters, the scene root and the render
//! backend. Every parameter change rebuilds the avatar once, using the
//! procedural generator when no model path is configured for the current
//! gender and the external model otherwise. Model loads run on the async
//! runtime; the frame loop polls for their completion and never waits.

use mannequin_backend_model::{
    detect_format, prepare_model, ExternalModelAsset, ModelError, PreparedModel,
};
use mannequin_backend_procedural::build_procedural_avatar;
use mannequin_spec::{
    clamp_params, derive_proportions, hierarchy_fingerprint, ClampNote, CustomizationParams,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::ViewerConfig;
use crate::loader::ModelLoader;
use crate::render::{Camera, RenderBackend};
use crate::scene_root::{AttachedAvatar, AvatarSource, SceneRoot};

/// Something observable that happened during a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Input parameters were adjusted into range.
    Clamped(Vec<ClampNote>),
    /// A new avatar was attached.
    Attached {
        source: AvatarSource,
        parts: usize,
        fingerprint: String,
    },
    /// A model load was requested.
    LoadStarted { path: PathBuf, generation: u64 },
    /// A completed load was no longer wanted.
    LoadDiscarded { path: PathBuf, generation: u64 },
    /// A model could not be used; the previous avatar stays.
    LoadFailed(ModelError),
}

/// Result of a background load, sent back to the frame loop.
struct LoadCompletion {
    generation: u64,
    path: PathBuf,
    result: Result<ExternalModelAsset, ModelError>,
}

/// One viewer session.
pub struct AvatarSession<B: RenderBackend, L: ModelLoader> {
    config: ViewerConfig,
    backend: B,
    loader: Arc<L>,
    scene: SceneRoot,
    params: CustomizationParams,
    cache: HashMap<PathBuf, Arc<ExternalModelAsset>>,
    /// Generation of the most recent load request.
    generation: u64,
    /// Model path the current parameters want, if any.
    desired: Option<PathBuf>,
    /// Latest load request still in flight, with its generation.
    pending: Option<(PathBuf, u64)>,
    outstanding: usize,
    tx: mpsc::UnboundedSender<LoadCompletion>,
    rx: mpsc::UnboundedReceiver<LoadCompletion>,
    events: Vec<SessionEvent>,
}

impl<B: RenderBackend, L: ModelLoader> AvatarSession<B, L> {
    /// Creates a session and configures the backend. Nothing is attached
    /// until [`set_params`](Self::set_params) is called.
    pub fn new(config: ViewerConfig, mut backend: B, loader: L) -> Self {
        backend.configure(&config.lighting, &config.ground, config.background);
        backend.set_camera(&Camera::from_config(&config.camera));
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            backend,
            loader: Arc::new(loader),
            scene: SceneRoot::new(),
            params: CustomizationParams::default(),
            cache: HashMap::new(),
            generation: 0,
            desired: None,
            pending: None,
            outstanding: 0,
            tx,
            rx,
            events: Vec::new(),
        }
    }

    pub fn params(&self) -> &CustomizationParams {
        &self.params
    }

    pub fn scene(&self) -> &SceneRoot {
        &self.scene
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Latest load generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a model load is in flight.
    pub fn is_loading(&self) -> bool {
        self.outstanding > 0
    }

    /// Whether a model is cached for `path`.
    pub fn is_cached(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replaces the parameters and rebuilds the avatar once.
    ///
    /// Parameters are clamped first. Must be called within a Tokio runtime
    /// when a model path is configured, since uncached models are loaded on
    /// a spawned task.
    pub fn set_params(&mut self, params: CustomizationParams) {
        let outcome = clamp_params(&params);
        if !outcome.notes.is_empty() {
            for note in &outcome.notes {
                tracing::warn!(%note, "parameter clamped");
            }
            self.events.push(SessionEvent::Clamped(outcome.notes));
        }
        self.params = outcome.params;
        self.rebuild();
    }

    /// Rebuilds the avatar for the current parameters.
    pub fn rebuild(&mut self) {
        let Some(path) = self.config.models.get(self.params.gender).map(Path::to_path_buf) else {
            self.desired = None;
            self.attach_procedural();
            return;
        };

        let format = match detect_format(&path) {
            Ok(format) => format,
            Err(err) => {
                tracing::error!(error = %err, "model rejected");
                self.desired = None;
                self.events.push(SessionEvent::LoadFailed(err));
                return;
            }
        };

        if let Some(asset) = self.cache.get(&path).cloned() {
            self.desired = Some(path);
            self.attach_model(&asset);
            return;
        }

        if self.pending.as_ref().is_some_and(|(pending, _)| *pending == path) {
            // Already loading this path; the completion uses the latest params.
            self.desired = Some(path);
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        self.desired = Some(path.clone());
        self.pending = Some((path.clone(), generation));
        self.outstanding += 1;
        self.events.push(SessionEvent::LoadStarted {
            path: path.clone(),
            generation,
        });
        tracing::debug!(path = %path.display(), generation, "requesting model load");

        let future = self.loader.load(path.clone(), format);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = future.await;
            let _ = tx.send(LoadCompletion {
                generation,
                path,
                result,
            });
        });
    }

    /// Runs one frame: applies finished loads, advances animation or idle
    /// rotation, and renders.
    pub fn frame(&mut self, delta_secs: f32) {
        while let Ok(completion) = self.rx.try_recv() {
            self.complete(completion);
        }

        let idle = self.config.idle_rotation_per_frame;
        let mut spin = false;
        if let Some(avatar) = self.scene.current_mut() {
            match avatar.player.as_mut() {
                Some(player) => player.advance(delta_secs),
                None => spin = true,
            }
        }
        if spin {
            self.scene.rotate(idle);
        }

        self.backend.render(&self.scene);
    }

    /// Waits for every in-flight load to finish and applies the results.
    pub async fn settle(&mut self) {
        while self.outstanding > 0 {
            match self.rx.recv().await {
                Some(completion) => self.complete(completion),
                None => break,
            }
        }
    }

    /// Detaches and disposes the current avatar.
    pub fn shutdown(&mut self) {
        self.desired = None;
        self.scene.clear(&mut self.backend);
    }

    fn complete(&mut self, completion: LoadCompletion) {
        self.outstanding = self.outstanding.saturating_sub(1);
        let LoadCompletion {
            generation,
            path,
            result,
        } = completion;
        if self.pending.as_ref().is_some_and(|(_, g)| *g == generation) {
            self.pending = None;
        }

        let wanted = generation == self.generation && self.desired.as_deref() == Some(path.as_path());
        if !wanted {
            tracing::warn!(
                path = %path.display(),
                generation,
                latest = self.generation,
                "discarding stale model load"
            );
            self.events
                .push(SessionEvent::LoadDiscarded { path, generation });
            return;
        }

        match result {
            Ok(asset) => {
                let asset = Arc::new(asset);
                self.cache.insert(path, Arc::clone(&asset));
                self.attach_model(&asset);
            }
            Err(err) => {
                tracing::error!(error = %err, "model load failed, keeping previous avatar");
                self.events.push(SessionEvent::LoadFailed(err));
            }
        }
    }

    fn attach_procedural(&mut self) {
        let proportions = derive_proportions(&self.params);
        let hierarchy = build_procedural_avatar(&self.params, &proportions);
        self.backend
            .set_camera(&Camera::from_config(&self.config.camera));
        self.attach(AttachedAvatar::procedural(hierarchy));
    }

    fn attach_model(&mut self, asset: &ExternalModelAsset) {
        let PreparedModel {
            hierarchy,
            normalize,
            player,
            ..
        } = prepare_model(asset, &self.params, self.config.scale_strategy);

        if self.config.camera.auto_frame && !normalize.final_bounds.is_empty() {
            let camera = Camera::from_config(&self.config.camera)
                .framing(normalize.final_bounds.size().y);
            self.backend.set_camera(&camera);
        }

        self.attach(AttachedAvatar {
            source: AvatarSource::Model(asset.path().to_path_buf()),
            hierarchy,
            player,
        });
    }

    fn attach(&mut self, avatar: AttachedAvatar) {
        let parts = avatar.hierarchy.part_count();
        let fingerprint = match hierarchy_fingerprint(&avatar.hierarchy) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                tracing::warn!(error = %err, "could not fingerprint attached avatar");
                String::new()
            }
        };
        let source = avatar.source.clone();
        self.scene.swap(avatar, &mut self.backend);
        tracing::debug!(%source, parts, %fingerprint, "attached avatar");
        self.events.push(SessionEvent::Attached {
            source,
            parts,
            fingerprint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ModelLoader;
    use crate::render::RecordingBackend;
    use futures_util::future::{BoxFuture, FutureExt};
    use glam::Vec3;
    use mannequin_backend_model::{ModelFormat, ModelResult};
    use mannequin_spec::{
        Aabb, Gender, Geometry, HairType, MeshPart, Part, PartHierarchy, Rgb,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    fn test_asset(path: &Path) -> ExternalModelAsset {
        let body = MeshPart {
            geometry: Geometry::Mesh {
                bounds: Aabb::new(Vec3::new(-0.3, 0.0, -0.2), Vec3::new(0.3, 1.8, 0.2)),
                vertex_count: 24,
                triangle_count: 12,
            },
            ..MeshPart::new(Geometry::sphere(1.0), Rgb::WHITE)
        };
        let root = Part::group("model").with_child(Part::mesh("Body", body, Vec3::ZERO));
        ExternalModelAsset::new(path, ModelFormat::Glb, PartHierarchy::new(root), vec![])
    }

    /// Loader whose loads complete only when the test releases them.
    #[derive(Default)]
    struct GatedLoader {
        calls: AtomicUsize,
        gates: Mutex<Vec<(PathBuf, oneshot::Sender<bool>)>>,
    }

    impl GatedLoader {
        fn open(&self, path: &str, succeed: bool) {
            let mut gates = self.gates.lock().unwrap();
            if let Some(i) = gates.iter().position(|(p, _)| p == Path::new(path)) {
                let (_, tx) = gates.remove(i);
                let _ = tx.send(succeed);
            }
        }

        fn release(&self, path: &str) {
            self.open(path, true);
        }

        fn fail(&self, path: &str) {
            self.open(path, false);
        }
    }

    impl ModelLoader for Arc<GatedLoader> {
        fn load(
            &self,
            path: PathBuf,
            _format: ModelFormat,
        ) -> BoxFuture<'static, ModelResult<ExternalModelAsset>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().push((path.clone(), tx));
            async move {
                match rx.await {
                    Ok(false) => Err(ModelError::AssetLoad {
                        cause: "gate failed".into(),
                        path,
                    }),
                    _ => Ok(test_asset(&path)),
                }
            }
            .boxed()
        }
    }

    fn session(
        config: ViewerConfig,
    ) -> (AvatarSession<RecordingBackend, Arc<GatedLoader>>, Arc<GatedLoader>) {
        let loader = Arc::new(GatedLoader::default());
        let s = AvatarSession::new(config, RecordingBackend::default(), Arc::clone(&loader));
        (s, loader)
    }

    #[tokio::test]
    async fn test_procedural_by_default() {
        let (mut s, loader) = session(ViewerConfig::default());
        s.set_params(CustomizationParams::default());
        s.frame(0.016);

        assert_eq!(s.scene().child_count(), 1);
        assert_eq!(
            s.scene().current().unwrap().source,
            AvatarSource::Procedural
        );
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
        assert!(s.backend().configured);
    }

    #[tokio::test]
    async fn test_rebuilds_dispose_previous() {
        let (mut s, _) = session(ViewerConfig::default());
        for hair in HairType::ALL {
            s.set_params(CustomizationParams::default().with_hair(hair));
            s.frame(0.016);
        }
        let b = s.backend();
        assert_eq!(b.attached, 1);
        assert_eq!(b.disposals, HairType::ALL.len() - 1);
        let current = s.scene().current().unwrap().hierarchy.resources();
        assert_eq!(b.live, current);
    }

    #[tokio::test]
    async fn test_attached_event_carries_fingerprint() {
        let (mut s, _) = session(ViewerConfig::default());
        s.set_params(CustomizationParams::default().with_hair(HairType::Curly));
        let expected = hierarchy_fingerprint(&s.scene().current().unwrap().hierarchy).unwrap();

        let events = s.take_events();
        match events.as_slice() {
            [SessionEvent::Attached {
                source,
                fingerprint,
                ..
            }] => {
                assert_eq!(*source, AvatarSource::Procedural);
                assert_eq!(fingerprint.len(), 64);
                assert_eq!(*fingerprint, expected);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_idle_rotation_accumulates() {
        let (mut s, _) = session(ViewerConfig::default());
        s.set_params(CustomizationParams::default());
        for _ in 0..10 {
            s.frame(0.016);
        }
        assert!((s.scene().yaw() - 0.05).abs() < 1e-5);
        assert_eq!(s.backend().frames, 10);
    }

    #[tokio::test]
    async fn test_unsupported_format_reported_without_load() {
        let config = ViewerConfig::default().with_model(Gender::Male, "models/model.obj");
        let (mut s, loader) = session(config);
        s.set_params(CustomizationParams::default());

        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
        assert!(s.scene().current().is_none());
        let events = s.take_events();
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::LoadFailed(ModelError::UnsupportedFormat { .. })]
        ));
    }

    #[tokio::test]
    async fn test_model_attached_after_load() {
        let config = ViewerConfig::default().with_model(Gender::Male, "male.glb");
        let (mut s, loader) = session(config);
        s.set_params(CustomizationParams::default());
        s.frame(0.016);
        assert!(s.scene().current().is_none());
        assert!(s.is_loading());

        loader.release("male.glb");
        s.settle().await;

        let current = s.scene().current().unwrap();
        assert_eq!(current.source, AvatarSource::Model(PathBuf::from("male.glb")));
        assert!(s.is_cached(Path::new("male.glb")));
        let camera = s.backend().camera.unwrap();
        assert!(camera.position.z >= 3.0);

        // Cached: a params change rebuilds without another load.
        s.set_params(CustomizationParams::default().with_height(190.0));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(s.backend().attached, 1);
    }

    #[tokio::test]
    async fn test_stale_load_discarded_after_gender_switch() {
        let config = ViewerConfig::default()
            .with_model(Gender::Male, "male.glb")
            .with_model(Gender::Female, "female.glb");
        let (mut s, loader) = session(config);

        s.set_params(CustomizationParams::default());
        s.set_params(CustomizationParams::default().with_gender(Gender::Female));

        // The male load resolves first but is no longer wanted.
        loader.release("male.glb");
        loader.release("female.glb");
        s.settle().await;

        let events = s.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::LoadDiscarded { path, .. } if path == Path::new("male.glb")
        )));
        assert_eq!(
            s.scene().current().unwrap().source,
            AvatarSource::Model(PathBuf::from("female.glb"))
        );
        assert!(!s.is_cached(Path::new("male.glb")));
        assert_eq!(s.backend().attached, 1);
    }

    #[tokio::test]
    async fn test_switch_to_procedural_discards_pending_load() {
        let config = ViewerConfig::default().with_model(Gender::Female, "female.glb");
        let (mut s, loader) = session(config);

        s.set_params(CustomizationParams::default().with_gender(Gender::Female));
        s.set_params(CustomizationParams::default());
        loader.release("female.glb");
        s.settle().await;

        assert_eq!(
            s.scene().current().unwrap().source,
            AvatarSource::Procedural
        );
    }

    /// Runs frames until the session has reported `count` events.
    async fn pump_events(
        s: &mut AvatarSession<RecordingBackend, Arc<GatedLoader>>,
        count: usize,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for _ in 0..100 {
            tokio::task::yield_now().await;
            s.frame(0.016);
            events.extend(s.take_events());
            if events.len() >= count {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_rebuild_after_failed_load_ignores_other_inflight_loads() {
        let config = ViewerConfig::default()
            .with_model(Gender::Male, "male.glb")
            .with_model(Gender::Female, "female.glb");
        let (mut s, loader) = session(config);
        let female = CustomizationParams::default().with_gender(Gender::Female);

        s.set_params(CustomizationParams::default());
        s.set_params(female.clone());
        s.take_events();
        loader.fail("female.glb");
        let events = pump_events(&mut s, 1).await;
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::LoadFailed(ModelError::AssetLoad { .. })]
        ));
        // The male load is still in flight.
        assert!(s.is_loading());

        s.set_params(female.with_height(180.0));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            s.take_events().as_slice(),
            [SessionEvent::LoadStarted { generation: 3, .. }]
        ));

        loader.release("male.glb");
        loader.release("female.glb");
        s.settle().await;
        assert_eq!(
            s.scene().current().unwrap().source,
            AvatarSource::Model(PathBuf::from("female.glb"))
        );
        assert!(!s.is_cached(Path::new("male.glb")));
    }

    #[tokio::test]
    async fn test_same_path_request_reuses_inflight_load() {
        let config = ViewerConfig::default().with_model(Gender::Male, "male.glb");
        let (mut s, loader) = session(config);

        s.set_params(CustomizationParams::default());
        s.set_params(CustomizationParams::default().with_hair(HairType::Long));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);

        loader.release("male.glb");
        s.settle().await;
        assert_eq!(s.generation(), 1);
        assert_eq!(s.backend().attached, 1);
    }

    #[tokio::test]
    async fn test_shutdown_releases_everything() {
        let (mut s, _) = session(ViewerConfig::default());
        s.set_params(CustomizationParams::default());
        s.shutdown();
        assert_eq!(s.backend().attached, 0);
        assert_eq!(s.backend().live.geometries, 0);
    }
}
