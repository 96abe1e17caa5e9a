//! Scene flow: Menu -> Gameplay
//!
//! The menu has no UI; creating it immediately starts gameplay. The
//! [`Director`] owns whichever scene is active and forwards host frames to it.

use crate::consts::{STARFIELD_KEY, STARFIELD_URL};
use crate::sim::{FrameInput, GameState, tick};
use crate::tuning::Tuning;

/// Scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Menu,
    Play,
}

/// What a scene asks for after its create step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Start(SceneKey),
}

/// A texture the host should load for a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: &'static str,
    pub url: &'static str,
}

/// Textures gameplay draws with
pub const PLAY_ASSETS: &[AssetRequest] = &[AssetRequest {
    key: STARFIELD_KEY,
    url: STARFIELD_URL,
}];

/// Entry scene
#[derive(Debug, Clone, Copy, Default)]
pub struct Menu;

impl Menu {
    /// No menu needed; go straight to gameplay
    pub fn create(&self) -> Transition {
        Transition::Start(SceneKey::Play)
    }
}

/// The active scene and its state
#[derive(Debug)]
pub enum ActiveScene {
    Menu(Menu),
    Play(Box<GameState>),
}

impl ActiveScene {
    pub fn key(&self) -> SceneKey {
        match self {
            ActiveScene::Menu(_) => SceneKey::Menu,
            ActiveScene::Play(_) => SceneKey::Play,
        }
    }
}

/// Owns the active scene and drives it from the host loop
#[derive(Debug)]
pub struct Director {
    tuning: Tuning,
    seed: u64,
    active: ActiveScene,
    /// Assets requested by the most recent preload
    pending_assets: Vec<AssetRequest>,
}

impl Director {
    /// Boot into the menu (which hands off to gameplay right away)
    pub fn boot(tuning: Tuning, seed: u64) -> Self {
        let mut director = Self {
            tuning,
            seed,
            active: ActiveScene::Menu(Menu),
            pending_assets: Vec::new(),
        };
        director.start(SceneKey::Menu);
        director
    }

    /// Start a scene, following any transitions its create step requests
    pub fn start(&mut self, key: SceneKey) {
        let mut next = Some(key);
        while let Some(key) = next.take() {
            log::info!("Starting scene {:?}", key);
            match key {
                SceneKey::Menu => {
                    let menu = Menu;
                    let transition = menu.create();
                    self.active = ActiveScene::Menu(menu);
                    if let Transition::Start(to) = transition {
                        next = Some(to);
                    }
                }
                SceneKey::Play => {
                    self.pending_assets = Self::preload(SceneKey::Play).to_vec();
                    let state = GameState::new(self.seed, self.tuning.clone());
                    self.active = ActiveScene::Play(Box::new(state));
                }
            }
        }
    }

    /// Assets a scene needs before its create step
    pub fn preload(key: SceneKey) -> &'static [AssetRequest] {
        match key {
            SceneKey::Menu => &[],
            SceneKey::Play => PLAY_ASSETS,
        }
    }

    /// Take the asset requests the host hasn't loaded yet
    pub fn take_pending_assets(&mut self) -> Vec<AssetRequest> {
        std::mem::take(&mut self.pending_assets)
    }

    /// Restart gameplay with a new seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.start(SceneKey::Play);
    }

    /// Run one host frame
    pub fn frame(&mut self, input: &FrameInput, delta_ms: f32) {
        if let ActiveScene::Play(state) = &mut self.active {
            tick(state, input, delta_ms);
        }
    }

    pub fn active(&self) -> &ActiveScene {
        &self.active
    }

    /// Gameplay state, if gameplay is running
    pub fn gameplay(&self) -> Option<&GameState> {
        match &self.active {
            ActiveScene::Play(state) => Some(state.as_ref()),
            ActiveScene::Menu(_) => None,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_lands_in_gameplay() {
        let mut director = Director::boot(Tuning::default(), 1);
        assert_eq!(director.active().key(), SceneKey::Play);

        let assets = director.take_pending_assets();
        assert_eq!(assets, PLAY_ASSETS.to_vec());
        assert_eq!(assets[0].key, "starfield");
        assert!(director.take_pending_assets().is_empty());

        let state = director.gameplay().unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_menu_requests_play() {
        assert_eq!(Menu.create(), Transition::Start(SceneKey::Play));
        assert!(Director::preload(SceneKey::Menu).is_empty());
    }

    #[test]
    fn test_frames_reach_gameplay() {
        let mut director = Director::boot(Tuning::default(), 1);
        let input = FrameInput {
            left: true,
            ..Default::default()
        };
        director.frame(&input, 100.0);
        let state = director.gameplay().unwrap();
        assert_eq!(state.frame, 1);
        assert_eq!(state.player.pos.x, 270.0);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut director = Director::boot(Tuning::default(), 1);
        director.frame(&FrameInput::default(), 16.0);
        director.restart(2);
        let state = director.gameplay().unwrap();
        assert_eq!(state.frame, 0);
        assert_eq!(state.seed, 2);
    }
}
