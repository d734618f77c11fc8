//! Animation collaborator contract and a crossfading implementation of it.

use std::collections::BTreeMap;
use std::fmt::Debug;

use fetch_core::{AnimationConfig, ConfigError};
use tracing::{debug, error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnimationClip {
    Crawl,
    CrawlToSit,
    PickBall,
    SitToCrawl,
}

impl AnimationClip {
    pub const ALL: [AnimationClip; 4] = [
        AnimationClip::Crawl,
        AnimationClip::CrawlToSit,
        AnimationClip::PickBall,
        AnimationClip::SitToCrawl,
    ];

    /// Clip name as authored in the animation asset.
    pub fn name(self) -> &'static str {
        match self {
            AnimationClip::Crawl => "Crawl",
            AnimationClip::CrawlToSit => "CrawlToSit",
            AnimationClip::PickBall => "PickBall",
            AnimationClip::SitToCrawl => "SitToCrawl",
        }
    }
}

/// Receiver of animation requests.
///
/// # Contract
///
/// `play(clip)` MUST be a no-op when `clip` is the last clip it accepted. Otherwise it starts a
/// blend to `clip` and remembers it as the last one. The behavior controller requests `Crawl`
/// on every tick of every moving state and relies on this to avoid restarting the blend.
pub trait Animator {
    fn play(&mut self, clip: AnimationClip);

    /// Suspend or resume driving the rig, e.g. while a procedural head look owns the head bone.
    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Engine side of animation: resolves clip names to handles and performs crossfades.
pub trait AnimationBackend {
    type Handle: Copy + Debug;

    fn resolve(&self, clip_name: &str) -> Option<Self::Handle>;
    fn cross_fade(&mut self, handle: Self::Handle, duration: f32);

    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Clip to engine handle mapping, resolved once at setup.
#[derive(Debug, Clone)]
pub struct ClipTable<H> {
    handles: BTreeMap<AnimationClip, H>,
}

impl<H: Copy> ClipTable<H> {
    pub fn resolve<B>(backend: &B) -> Self
    where
        B: AnimationBackend<Handle = H>,
    {
        let mut handles = BTreeMap::new();
        for clip in AnimationClip::ALL {
            match backend.resolve(clip.name()) {
                Some(handle) => {
                    handles.insert(clip, handle);
                }
                None => error!(clip = clip.name(), "animation clip not found"),
            }
        }
        Self { handles }
    }

    pub fn get(&self, clip: AnimationClip) -> Option<H> {
        self.handles.get(&clip).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// [`Animator`] that crossfades through an [`AnimationBackend`] and drops repeated requests.
pub struct CrossfadeAnimator<B: AnimationBackend> {
    backend: B,
    clips: ClipTable<B::Handle>,
    crossfade_duration: f32,
    last: AnimationClip,
    enabled: bool,
    /// Clip the backend is actually blending to; lags `last` while disabled.
    applied: AnimationClip,
    transitions: u64,
}

impl<B: AnimationBackend> CrossfadeAnimator<B> {
    /// The rig starts in the seated pose, so `CrawlToSit` counts as already playing.
    pub fn new(backend: B, config: &AnimationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let clips = ClipTable::resolve(&backend);
        Ok(Self {
            backend,
            clips,
            crossfade_duration: config.crossfade_duration,
            last: AnimationClip::CrawlToSit,
            enabled: true,
            applied: AnimationClip::CrawlToSit,
            transitions: 0,
        })
    }

    pub fn last(&self) -> AnimationClip {
        self.last
    }

    /// Crossfades actually started since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn cross_fade_to(&mut self, clip: AnimationClip, handle: B::Handle) {
        self.applied = clip;
        self.transitions += 1;
        debug!(clip = clip.name(), "crossfade");
        self.backend.cross_fade(handle, self.crossfade_duration);
    }
}

impl<B: AnimationBackend> Animator for CrossfadeAnimator<B> {
    /// While disabled the request is remembered but not sent; re-enabling fades to it.
    fn play(&mut self, clip: AnimationClip) {
        if clip == self.last {
            return;
        }
        let Some(handle) = self.clips.get(clip) else {
            error!(clip = clip.name(), "no handle for animation clip");
            return;
        };

        self.last = clip;
        if !self.enabled {
            debug!(clip = clip.name(), "crossfade deferred: rig disabled");
            return;
        }
        self.cross_fade_to(clip, handle);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.backend.set_enabled(enabled);
        if !enabled || self.applied == self.last {
            return;
        }
        if let Some(handle) = self.clips.get(self.last) {
            self.cross_fade_to(self.last, handle);
        }
    }
}
