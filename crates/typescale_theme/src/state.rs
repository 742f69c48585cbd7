//! Live playground state
//!
//! Holds the current scale parameters and responsive configuration. Every
//! mutation synchronously rebuilds the scale and re-projects it, so readers
//! always see a complete, fresh snapshot and never a partially patched one.
//!
//! One value leaves the reactive model on purpose: the selected font stack
//! (and the root font size) are pushed to a [`RootStyleMirror`] so styling
//! outside the typography tree stays consistent with it.

use crate::controls;
use crate::error::ControlError;
use crate::mirror::{DocumentRoot, RootStyleMirror, APP_FONT_VARIABLE, ROOT_FONT_SIZE_PROPERTY};
use crate::presets::FontPreset;
use crate::responsive::{project, ResponsiveConfig, ResponsiveTypography};
use crate::scale::{build, ScaleParameters};
use crate::tokens::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Global playground state instance
static PLAYGROUND_STATE: OnceLock<PlaygroundState> = OnceLock::new();

/// Called with every fresh snapshot
pub type Subscriber = Arc<dyn Fn(&Arc<ResponsiveTypography>) + Send + Sync>;

/// Handle returned by [`PlaygroundState::subscribe`], used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Current parameters plus the typography derived from them
pub struct PlaygroundState {
    /// Selected font preset (its stack is mirrored into `params.font_family`)
    font: RwLock<FontPreset>,

    /// Scale builder input
    params: RwLock<ScaleParameters>,

    /// Responsive projector input
    responsive: RwLock<ResponsiveConfig>,

    /// Latest build + projection
    derived: RwLock<Arc<ResponsiveTypography>>,

    /// Bumped on every recomputation
    revision: AtomicU64,

    /// Side channel for styling outside the typography tree
    mirror: Box<dyn RootStyleMirror>,

    subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl PlaygroundState {
    /// Fresh state with defaults, mirroring into the document root
    pub fn new() -> Self {
        Self::with_mirror(DocumentRoot)
    }

    /// Fresh state with defaults and a custom mirror
    pub fn with_mirror(mirror: impl RootStyleMirror + 'static) -> Self {
        let font = FontPreset::default();
        let params = ScaleParameters {
            font_family: font.stack().to_string(),
            ..ScaleParameters::default()
        };
        let responsive = ResponsiveConfig::default();
        let derived = Arc::new(project(&build(&params), &responsive));

        let state = Self {
            font: RwLock::new(font),
            params: RwLock::new(params),
            responsive: RwLock::new(responsive),
            derived: RwLock::new(derived),
            revision: AtomicU64::new(0),
            mirror: Box::new(mirror),
            subscribers: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        };
        state.mirror_font();
        state.mirror_root_size();
        state
    }

    /// Install `state` as the global instance (first call wins)
    pub fn init(state: PlaygroundState) {
        if PLAYGROUND_STATE.set(state).is_err() {
            tracing::warn!("PlaygroundState already initialized; keeping the existing instance");
        }
    }

    /// Install a default global instance
    pub fn init_default() {
        Self::init(Self::new());
    }

    /// Get the global playground state instance
    ///
    /// # Panics
    ///
    /// Panics if [`PlaygroundState::init`] has not been called.
    pub fn get() -> &'static PlaygroundState {
        PLAYGROUND_STATE
            .get()
            .expect("PlaygroundState not initialized. Call PlaygroundState::init() at startup.")
    }

    /// Try to get the global state (returns None if not initialized)
    pub fn try_get() -> Option<&'static PlaygroundState> {
        PLAYGROUND_STATE.get()
    }

    // ========== Snapshot Access ==========

    /// Latest derived typography
    pub fn snapshot(&self) -> Arc<ResponsiveTypography> {
        read(&self.derived).clone()
    }

    /// Number of recomputations since creation
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn parameters(&self) -> ScaleParameters {
        read(&self.params).clone()
    }

    pub fn responsive_config(&self) -> ResponsiveConfig {
        read(&self.responsive).clone()
    }

    pub fn font(&self) -> FontPreset {
        *read(&self.font)
    }

    /// Register a callback run after every recomputation
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Arc<ResponsiveTypography>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        write(&self.subscribers).push((id, Arc::new(callback)));
        id
    }

    /// Drop a callback. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = write(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        read(&self.subscribers).len()
    }

    // ========== Scale Parameters ==========

    pub fn set_font(&self, font: FontPreset) {
        {
            *write(&self.font) = font;
            write(&self.params).font_family = font.stack().to_string();
        }
        tracing::debug!(font = %font, "font changed");
        self.mirror_font();
        self.recompute();
    }

    pub fn set_base_font_size(&self, px: f32) -> Result<(), ControlError> {
        let px = controls::base_font_size(px)?;
        write(&self.params).base_font_size = px;
        tracing::debug!(px, "base font size changed");
        self.mirror_root_size();
        self.recompute();
        Ok(())
    }

    /// Returns the value actually applied after clamping/snapping
    pub fn set_modular_ratio(&self, ratio: f32) -> Result<f32, ControlError> {
        let ratio = controls::MODULAR_RATIO.snap(ratio)?;
        write(&self.params).modular_ratio = ratio;
        tracing::debug!(ratio, "modular ratio changed");
        self.recompute();
        Ok(ratio)
    }

    pub fn set_font_weight(&self, variant: Variant, weight: u16) -> Result<(), ControlError> {
        let weight = controls::font_weight(weight)?;
        write(&self.params)
            .font_weight_overrides
            .insert(variant, weight);
        tracing::debug!(%variant, %weight, "font weight changed");
        self.recompute();
        Ok(())
    }

    /// Returns the value actually applied after clamping/snapping
    pub fn set_letter_spacing(&self, variant: Variant, em: f32) -> Result<f32, ControlError> {
        let em = controls::LETTER_SPACING.snap(em)?;
        write(&self.params)
            .letter_spacing_overrides
            .insert(variant, em);
        tracing::debug!(%variant, em, "letter spacing changed");
        self.recompute();
        Ok(em)
    }

    // ========== Responsive Config ==========

    /// Returns the value actually applied after clamping/snapping
    pub fn set_factor(&self, factor: f32) -> Result<f32, ControlError> {
        let factor = controls::FACTOR.snap(factor)?;
        write(&self.responsive).factor = factor;
        tracing::debug!(factor, "factor changed");
        self.recompute();
        Ok(factor)
    }

    pub fn set_disable_align(&self, disable: bool) {
        write(&self.responsive).disable_align = disable;
        tracing::debug!(disable, "grid alignment toggled");
        self.recompute();
    }

    pub fn set_include_xl(&self, include: bool) {
        write(&self.responsive).set_include_xl(include);
        tracing::debug!(include, "xl breakpoint toggled");
        self.recompute();
    }

    /// Restore every parameter to its default
    pub fn reset(&self) {
        let font = FontPreset::default();
        {
            *write(&self.font) = font;
            *write(&self.params) = ScaleParameters {
                font_family: font.stack().to_string(),
                ..ScaleParameters::default()
            };
            *write(&self.responsive) = ResponsiveConfig::default();
        }
        tracing::debug!("parameters reset");
        self.mirror_font();
        self.mirror_root_size();
        self.recompute();
    }

    // ========== Derivation ==========

    fn recompute(&self) {
        // Inputs are read under the derived lock, so the last stored snapshot
        // always reflects the last parameter write.
        let snapshot = {
            let mut derived = write(&self.derived);
            let params = self.parameters();
            let responsive = self.responsive_config();
            let snapshot = Arc::new(project(&build(&params), &responsive));
            *derived = snapshot.clone();
            let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::trace!(revision, "typography recomputed");
            snapshot
        };

        // Clone out so subscribers may read the state
        let subscribers: Vec<Subscriber> = read(&self.subscribers)
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    fn mirror_font(&self) {
        let font = self.font();
        self.mirror.set_property(APP_FONT_VARIABLE, font.stack());
    }

    fn mirror_root_size(&self) {
        let px = read(&self.params).base_font_size;
        self.mirror
            .set_property(ROOT_FONT_SIZE_PROPERTY, &format!("{px}px"));
    }
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Arc<Mutex<Vec<(String, String)>>>);

    impl RootStyleMirror for Recorder {
        fn set_property(&self, name: &str, value: &str) {
            self.0.lock().unwrap().push((name.into(), value.into()));
        }
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let state = PlaygroundState::with_mirror(Recorder::default());
        assert_eq!(state.revision(), 0);

        state.set_factor(3.0).unwrap();
        state.set_disable_align(true);
        state.set_include_xl(false);
        state.set_font(FontPreset::Inter);
        assert_eq!(state.revision(), 4);
    }

    #[test]
    fn test_rejected_values_leave_state_untouched() {
        let state = PlaygroundState::with_mirror(Recorder::default());
        let before = state.snapshot();

        assert!(state.set_base_font_size(13.0).is_err());
        assert!(state.set_font_weight(Variant::H1, 650).is_err());
        assert!(state.set_factor(f32::NAN).is_err());

        assert_eq!(state.revision(), 0);
        assert!(Arc::ptr_eq(&before, &state.snapshot()));
    }

    #[test]
    fn test_font_changes_are_mirrored() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = PlaygroundState::with_mirror(Recorder(log.clone()));
        state.set_font(FontPreset::Roboto);

        let log = log.lock().unwrap();
        let last_font = log
            .iter()
            .rev()
            .find(|(name, _)| name == APP_FONT_VARIABLE)
            .map(|(_, value)| value.as_str());
        assert_eq!(last_font, Some(FontPreset::Roboto.stack()));
        assert!(log.contains(&(ROOT_FONT_SIZE_PROPERTY.to_string(), "12px".to_string())));
    }

    #[test]
    fn test_unsubscribed_callbacks_stop_firing() {
        let state = PlaygroundState::with_mirror(Recorder::default());
        let hits = Arc::new(AtomicU64::new(0));

        let counter = hits.clone();
        let id = state.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let _other = state.subscribe(|_| {});
        assert_eq!(state.subscriber_count(), 2);

        state.set_disable_align(true);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set_disable_align(false);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(state.subscriber_count(), 1);
    }

    #[test]
    fn test_concurrent_setters_leave_a_fresh_snapshot() {
        let state = PlaygroundState::with_mirror(Recorder::default());

        std::thread::scope(|scope| {
            for t in 0..4u16 {
                let state = &state;
                scope.spawn(move || {
                    for i in 0..50u16 {
                        let factor = 1.0 + f32::from((t * 50 + i) % 70) / 10.0;
                        state.set_factor(factor).unwrap();
                        state.set_font_weight(Variant::H1, 100 * (1 + (t + i) % 9)).unwrap();
                    }
                });
            }
        });

        let snapshot = state.snapshot();
        assert_eq!(state.revision(), 400);
        assert_eq!(snapshot.config, state.responsive_config());
        assert_eq!(
            snapshot.base.style(Variant::H1).weight,
            state.parameters().font_weight(Variant::H1)
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = PlaygroundState::with_mirror(Recorder::default());
        state.set_modular_ratio(1.5).unwrap();
        state.set_font_weight(Variant::Body1, 900).unwrap();
        state.set_include_xl(false);
        state.reset();

        assert_eq!(state.parameters(), ScaleParameters::default());
        assert_eq!(state.responsive_config(), ResponsiveConfig::default());
        assert_eq!(state.font(), FontPreset::IbmPlexSans);
    }
}
