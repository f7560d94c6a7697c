//! Animation playback driver bound to one model copy.

use crate::asset::AnimationClip;

/// Playback state of one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipState {
    pub clip: AnimationClip,
    /// Current local time in seconds, in `[0, duration)`.
    pub time: f32,
    /// Number of completed loops.
    pub loops: u32,
}

/// Plays every clip of a model at once, looping each independently.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlayer {
    clips: Vec<ClipState>,
    playing: bool,
}

impl AnimationPlayer {
    /// Starts all clips at time zero. Returns `None` when there are no clips,
    /// in which case the caller falls back to idle rotation.
    pub fn start_all(clips: &[AnimationClip]) -> Option<Self> {
        if clips.is_empty() {
            return None;
        }
        tracing::debug!(clips = clips.len(), "starting animation playback");
        Some(Self {
            clips: clips
                .iter()
                .map(|clip| ClipState {
                    clip: clip.clone(),
                    time: 0.0,
                    loops: 0,
                })
                .collect(),
            playing: true,
        })
    }

    /// Advances every clip by `delta_secs`.
    pub fn advance(&mut self, delta_secs: f32) {
        if !self.playing || !delta_secs.is_finite() || delta_secs <= 0.0 {
            return;
        }
        for state in &mut self.clips {
            let duration = state.clip.duration_secs;
            if duration <= 0.0 {
                continue;
            }
            let t = state.time + delta_secs;
            let wraps = (t / duration).floor();
            state.loops = state.loops.saturating_add(wraps as u32);
            state.time = t % duration;
        }
    }

    /// Stops every clip. Called when the bound model is disposed.
    pub fn stop_all(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn clips(&self) -> &[ClipState] {
        &self.clips
    }
}
