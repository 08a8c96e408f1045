//! Serializable animation scripts
//!
//! An [`AnimationScript`] is the persisted form of a tween sequence. It
//! holds only plain data: delays and durations in seconds, easing names,
//! slot names, target values and callback names. Closures and bindings are
//! looked up in an [`AnimationContext`] when the script is built.
//!
//! ```toml
//! [player]
//! fps = 60
//! advance = "cascade"
//!
//! [[slot]]
//! name = "door.y"
//! value = 0.0
//!
//! [[step]]
//! kind = "tween"
//! duration = 0.5
//! easing = "ease-out-bounce"
//! on_finish = "door_open"
//!
//! [[step.property]]
//! slot = "door.y"
//! to = 48.0
//!
//! [[step]]
//! kind = "wait"
//! duration = 1.0
//! ```

use std::collections::BTreeSet;

use serde::Deserialize;
use tempo_core::{seconds, Result, SlotStore, SlotValue, TweenError};

use crate::context::AnimationContext;
use crate::easing::Easing;
use crate::property::{AnimatedProperty, Property, Tweenable};
use crate::sequencer::{AdvanceMode, TweenAnimation};
use crate::tween::Tween;

/// A complete animation script
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnimationScript {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default, rename = "slot")]
    pub slots: Vec<SlotDef>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepDef>,
}

/// Playback settings for a script
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerConfig {
    /// Fixed tick rate used when playing the script
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Stop playback after this many seconds even if steps remain
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f32,
    #[serde(default)]
    pub advance: AdvanceMode,
}

fn default_fps() -> u32 {
    60
}

fn default_max_seconds() -> f32 {
    30.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_seconds: default_max_seconds(),
            advance: AdvanceMode::default(),
        }
    }
}

/// A literal value in a script
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Bool(bool),
    Float(f32),
}

impl ScriptValue {
    fn type_name(&self) -> &'static str {
        SlotValue::from(*self).type_name()
    }
}

impl From<ScriptValue> for SlotValue {
    fn from(value: ScriptValue) -> Self {
        match value {
            ScriptValue::Bool(v) => SlotValue::Bool(v),
            ScriptValue::Float(v) => SlotValue::Float(v),
        }
    }
}

/// A `[[slot]]` declaration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotDef {
    pub name: String,
    pub value: ScriptValue,
}

/// A `[[step]]` of the sequence
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepDef {
    Wait {
        duration: f32,
        on_start: Option<String>,
        on_finish: Option<String>,
    },
    Tween {
        #[serde(default)]
        delay: f32,
        #[serde(default)]
        duration: f32,
        #[serde(default)]
        easing: Easing,
        #[serde(default, rename = "property")]
        properties: Vec<PropertyDef>,
        on_start: Option<String>,
        on_finish: Option<String>,
    },
    Execute {
        #[serde(default)]
        delay: f32,
        #[serde(default)]
        duration: f32,
        callback: String,
        on_finish: Option<String>,
    },
}

/// A `[[step.property]]` inside a tween step
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyDef {
    pub slot: String,
    pub to: ScriptValue,
    pub from: Option<ScriptValue>,
    pub delay: Option<f32>,
    pub duration: Option<f32>,
    pub easing: Option<Easing>,
    pub on_update: Option<String>,
    #[serde(default)]
    pub capture_on_activate: bool,
}

impl AnimationScript {
    /// Parse a script from TOML source
    pub fn parse(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Declare every `[[slot]]` of the script in `slots`
    pub fn declare_slots(&self, slots: &mut SlotStore) -> Result<()> {
        for slot in &self.slots {
            slots.declare(slot.name.as_str(), slot.value.into())?;
        }
        Ok(())
    }

    /// Every callback name the script refers to
    pub fn callback_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        for step in &self.steps {
            match step {
                StepDef::Wait {
                    on_start,
                    on_finish,
                    ..
                } => names.extend(on_start.as_deref().into_iter().chain(on_finish.as_deref())),
                StepDef::Tween {
                    properties,
                    on_start,
                    on_finish,
                    ..
                } => {
                    names.extend(on_start.as_deref().into_iter().chain(on_finish.as_deref()));
                    names.extend(properties.iter().filter_map(|p| p.on_update.as_deref()));
                }
                StepDef::Execute {
                    callback,
                    on_finish,
                    ..
                } => {
                    names.insert(callback.as_str());
                    names.extend(on_finish.as_deref());
                }
            }
        }
        names
    }

    /// Resolve every name against `ctx` and build the sequencer
    ///
    /// Fails on the first unknown slot, unknown callback, type mismatch or
    /// invalid time value; nothing is partially built.
    pub fn build(&self, ctx: &AnimationContext) -> Result<TweenAnimation> {
        let mut animation = TweenAnimation::new().with_advance_mode(self.player.advance);
        for step in &self.steps {
            animation.push(step.build(ctx)?);
        }
        Ok(animation)
    }
}

impl StepDef {
    fn build(&self, ctx: &AnimationContext) -> Result<Tween> {
        let mut tween = Tween::new();
        match self {
            StepDef::Wait {
                duration,
                on_start,
                on_finish,
            } => {
                tween.default_duration(seconds("wait duration", *duration)?);
                attach_hooks(&mut tween, ctx, on_start.as_deref(), on_finish.as_deref())?;
            }
            StepDef::Tween {
                delay,
                duration,
                easing,
                properties,
                on_start,
                on_finish,
            } => {
                tween
                    .default_delay(seconds("tween delay", *delay)?)
                    .default_duration(seconds("tween duration", *duration)?)
                    .default_easing(*easing);
                for property in properties {
                    tween.add_boxed(property.build(ctx)?);
                }
                attach_hooks(&mut tween, ctx, on_start.as_deref(), on_finish.as_deref())?;
            }
            StepDef::Execute {
                delay,
                duration,
                callback,
                on_finish,
            } => {
                tween
                    .default_delay(seconds("execute delay", *delay)?)
                    .default_duration(seconds("execute duration", *duration)?);
                attach_hooks(&mut tween, ctx, Some(callback.as_str()), on_finish.as_deref())?;
            }
        }
        Ok(tween)
    }
}

fn attach_hooks(
    tween: &mut Tween,
    ctx: &AnimationContext,
    on_start: Option<&str>,
    on_finish: Option<&str>,
) -> Result<()> {
    if let Some(name) = on_start {
        tween.initial_callback(ctx.callbacks.resolve(name)?);
    }
    if let Some(name) = on_finish {
        tween.final_callback(ctx.callbacks.resolve(name)?);
    }
    Ok(())
}

impl PropertyDef {
    fn build(&self, ctx: &AnimationContext) -> Result<Box<dyn AnimatedProperty>> {
        match self.to {
            ScriptValue::Float(end) => {
                let mut property = ctx.slots.float(&self.slot)?.to(end);
                match self.from {
                    Some(ScriptValue::Float(start)) => property = property.starting_at(start),
                    Some(other) => return Err(self.mismatch("float", other)),
                    None => {}
                }
                Ok(Box::new(self.decorate(property, ctx)?))
            }
            ScriptValue::Bool(end) => {
                let mut property = ctx.slots.boolean(&self.slot)?.to(end);
                match self.from {
                    Some(ScriptValue::Bool(start)) => property = property.starting_at(start),
                    Some(other) => return Err(self.mismatch("bool", other)),
                    None => {}
                }
                Ok(Box::new(self.decorate(property, ctx)?))
            }
        }
    }

    fn decorate<T: Clone + 'static>(
        &self,
        mut property: Property<T>,
        ctx: &AnimationContext,
    ) -> Result<Property<T>> {
        property = property.label(self.slot.as_str());
        if let Some(delay) = self.delay {
            property = property.delay(seconds("property delay", delay)?);
        }
        if let Some(duration) = self.duration {
            property = property.duration(seconds("property duration", duration)?);
        }
        if let Some(easing) = self.easing {
            property = property.easing(easing);
        }
        if self.capture_on_activate {
            property = property.capture_on_activate();
        }
        if let Some(name) = &self.on_update {
            property = property.callback(ctx.callbacks.resolve(name)?);
        }
        Ok(property)
    }

    fn mismatch(&self, expected: &'static str, found: ScriptValue) -> TweenError {
        TweenError::SlotTypeMismatch {
            name: self.slot.clone(),
            expected,
            found: found.type_name(),
        }
    }
}
