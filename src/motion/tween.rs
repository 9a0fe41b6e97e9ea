use std::collections::BTreeMap;

use super::ease::Ease;

/// Animatable style channels. Transform channels are composed into one
/// `transform` declaration when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prop {
    Opacity,
    X,
    Y,
    XPercent,
    YPercent,
    Scale,
    ScaleX,
    ScaleY,
    /// `clip-path: inset(0 0 N% 0)`, used for bottom-up mask reveals.
    ClipBottom,
}

impl Prop {
    pub fn rest_value(self) -> f64 {
        match self {
            Prop::Opacity | Prop::Scale | Prop::ScaleX | Prop::ScaleY => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropRange {
    pub prop: Prop,
    pub from: f64,
    pub to: f64,
}

impl PropRange {
    /// Endpoints are returned exactly.
    pub fn at(&self, eased: f64) -> f64 {
        if eased <= 0.0 {
            self.from
        } else if eased >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * eased
        }
    }
}

/// One animation step for a single target slot. Targets are indices into the
/// node list handed to the registry together with the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: usize,
    pub props: Vec<PropRange>,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn on(target: usize) -> Self {
        Self {
            target,
            props: Vec::new(),
            duration: 0.6,
            ease: Ease::CubicOut,
        }
    }

    pub fn from_to(mut self, prop: Prop, from: f64, to: f64) -> Self {
        self.props.push(PropRange { prop, from, to });
        self
    }

    /// Animates from `from` to the channel's resting value.
    pub fn from(self, prop: Prop, from: f64) -> Self {
        self.from_to(prop, from, prop.rest_value())
    }

    /// Animates from the channel's resting value to `to`.
    pub fn to(self, prop: Prop, to: f64) -> Self {
        self.from_to(prop, prop.rest_value(), to)
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn retarget(&self, target: usize) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }
}

/// Resolved channel values for one target at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleFrame {
    values: BTreeMap<Prop, f64>,
}

impl StyleFrame {
    pub fn set(&mut self, prop: Prop, value: f64) {
        self.values.insert(prop, value);
    }

    pub fn get(&self, prop: Prop) -> Option<f64> {
        self.values.get(&prop).copied()
    }

    fn has_transform(&self) -> bool {
        self.values.keys().any(|p| {
            !matches!(p, Prop::Opacity | Prop::ClipBottom)
        })
    }

    fn channel(&self, prop: Prop) -> f64 {
        self.get(prop).unwrap_or_else(|| prop.rest_value())
    }

    /// CSS declarations as `(property, value)` pairs.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if self.has_transform() {
            let scale = self.channel(Prop::Scale);
            out.push((
                "transform",
                format!(
                    "translate({}%, {}%) translate3d({}px, {}px, 0) scale({}, {})",
                    self.channel(Prop::XPercent),
                    self.channel(Prop::YPercent),
                    self.channel(Prop::X),
                    self.channel(Prop::Y),
                    scale * self.channel(Prop::ScaleX),
                    scale * self.channel(Prop::ScaleY),
                ),
            ));
        }
        if let Some(opacity) = self.get(Prop::Opacity) {
            out.push(("opacity", format!("{}", opacity.clamp(0.0, 1.0))));
        }
        if let Some(clip) = self.get(Prop::ClipBottom) {
            out.push(("clip-path", format!("inset(0 0 {}% 0)", clip.clamp(0.0, 100.0))));
        }
        out
    }
}

/// Properties cleared when a scene is torn down.
pub const ANIMATED_CSS: [&str; 3] = ["transform", "opacity", "clip-path"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_targets_resting_value() {
        let tween = Tween::on(0).from(Prop::Opacity, 0.0).from(Prop::Y, 40.0);
        assert_eq!(tween.props[0].to, 1.0);
        assert_eq!(tween.props[1].to, 0.0);
    }

    #[test]
    fn declarations_compose_transform() {
        let mut frame = StyleFrame::default();
        frame.set(Prop::Y, 20.0);
        frame.set(Prop::Scale, 2.0);
        frame.set(Prop::Opacity, 1.4);
        let decls = frame.declarations();
        assert_eq!(decls.len(), 2);
        assert_eq!(
            decls[0].1,
            "translate(0%, 0%) translate3d(0px, 20px, 0) scale(2, 2)"
        );
        assert_eq!(decls[1], ("opacity", "1".to_string()));
    }

    #[test]
    fn opacity_only_frame_skips_transform() {
        let mut frame = StyleFrame::default();
        frame.set(Prop::Opacity, 0.5);
        assert_eq!(frame.declarations(), vec![("opacity", "0.5".to_string())]);
    }
}
