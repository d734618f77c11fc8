use fetch_agent::{AnimationBackend, AnimationClip};
use tracing::debug;

/// Engine-less animation backend: every clip exists, crossfades are only logged and counted.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRig {
    crossfades: Vec<AnimationClip>,
    enabled: bool,
}

impl HeadlessRig {
    pub fn new() -> Self {
        Self {
            crossfades: Vec::new(),
            enabled: true,
        }
    }

    pub fn crossfades(&self) -> &[AnimationClip] {
        &self.crossfades
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl AnimationBackend for HeadlessRig {
    type Handle = AnimationClip;

    fn resolve(&self, clip_name: &str) -> Option<AnimationClip> {
        AnimationClip::ALL
            .into_iter()
            .find(|clip| clip.name() == clip_name)
    }

    fn cross_fade(&mut self, handle: AnimationClip, duration: f32) {
        debug!(clip = handle.name(), duration, "rig crossfade");
        self.crossfades.push(handle);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
