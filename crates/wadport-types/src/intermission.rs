use serde::Serialize;

/// Visibility guard of a scripted drawable.
///
/// `IFTRAVELLING from to` is reduced to `Entering(to)`: the tally screen has
/// no way to know which map the player came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Guard {
    #[default]
    None,
    Entering(String),
    Leaving(String),
    Visited(String),
}

/// A `PIC` or `ANIMATION` directive with its optional guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAnimation {
    pub x: i32,
    pub y: i32,
    pub guard: Guard,
    pub once: bool,
    /// Frame duration in tics; `None` for a static `PIC`.
    pub speed_tics: Option<u32>,
    pub patches: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spot {
    pub x: i32,
    pub y: i32,
}

/// Parsed GZDoom intermission script.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IntermissionScript {
    /// Name of the lump the script was read from.
    pub name: String,
    pub background: Option<String>,
    pub splat: Option<String>,
    /// Left- and right-aligned "you are here" pointers.
    pub pointers: Option<(String, String)>,
    /// Spots in declaration order.
    pub spots: Vec<(String, Spot)>,
    pub animations: Vec<ScriptAnimation>,
}

impl IntermissionScript {
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty() && self.animations.is_empty()
    }

    /// Every image name the script refers to, in order of first use.
    pub fn images(&self) -> Vec<&str> {
        let fixed = [
            self.background.as_deref(),
            self.splat.as_deref(),
            self.pointers.as_ref().map(|p| p.0.as_str()),
            self.pointers.as_ref().map(|p| p.1.as_str()),
        ];
        let patches = self
            .animations
            .iter()
            .flat_map(|anim| anim.patches.iter().map(String::as_str));

        let mut images: Vec<&str> = Vec::new();
        for name in fixed.into_iter().flatten().chain(patches) {
            if !images.contains(&name) {
                images.push(name);
            }
        }
        images
    }
}
