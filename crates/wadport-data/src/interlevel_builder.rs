//! Lowering of a parsed intermission script to interlevel layers.

use std::collections::HashMap;
use std::rc::Rc;

use wadport_types::{
    Anim, Condition, DurationKind, Frame, Guard, InterlevelData, IntermissionScript, Layer,
    MapTable, ScriptAnimation,
};

use crate::intermission_parser::EMPTY_PATCH;

/// Pointers are 60 pixels wide on a 320 pixel screen; spots further right
/// than this get the pointer that points left.
const POINTER_FLIP_X: i32 = 320 - 60;
const POINTER_SHOWN_SECONDS: f64 = 0.667;
const POINTER_HIDDEN_SECONDS: f64 = 0.333;

/// Interns frames and condition lists so that equal fragments are one
/// shared node.
#[derive(Debug, Default)]
struct FragmentPool {
    frames: HashMap<(String, DurationKind, u64), Rc<Frame>>,
    conditions: HashMap<Vec<Condition>, Rc<[Condition]>>,
}

impl FragmentPool {
    fn frame(&mut self, frame: Frame) -> Rc<Frame> {
        let key = (frame.image.clone(), frame.kind, frame.duration.to_bits());
        Rc::clone(self.frames.entry(key).or_insert_with(|| Rc::new(frame)))
    }

    /// `None` for an empty list, which serializes as `null`.
    fn conditions(&mut self, conditions: &[Condition]) -> Option<Rc<[Condition]>> {
        if conditions.is_empty() {
            return None;
        }
        let shared = self
            .conditions
            .entry(conditions.to_vec())
            .or_insert_with(|| Rc::from(conditions));
        Some(Rc::clone(shared))
    }

    /// Number of distinct fragments.
    fn len(&self) -> usize {
        self.frames.len() + self.conditions.len()
    }
}

/// Builds the layers of one interlevel document. Unknown maps and missing
/// splat or pointer images are logged and degrade the output instead of
/// failing it.
pub struct InterlevelBuilder<'a> {
    script: &'a IntermissionScript,
    maps: &'a MapTable,
    pool: FragmentPool,
}

impl<'a> InterlevelBuilder<'a> {
    pub fn new(script: &'a IntermissionScript, maps: &'a MapTable) -> Self {
        Self {
            script,
            maps,
            pool: FragmentPool::default(),
        }
    }

    pub fn build(mut self, music: Option<&str>) -> InterlevelData {
        let layers = if self.script.is_empty() {
            None
        } else {
            let mut layers = Vec::new();
            if !self.script.animations.is_empty() {
                layers.push(self.animation_layer());
            }
            if !self.script.spots.is_empty() {
                let (splats, arrows) = self.spot_layers();
                layers.push(splats);
                layers.push(arrows);
            }
            Some(layers)
        };

        log::debug!(
            "{}: {} layers, {} shared fragments",
            self.script.name,
            layers.as_ref().map_or(0, Vec::len),
            self.pool.len()
        );
        InterlevelData {
            music: music.map(str::to_string),
            background: self.script.background.clone(),
            layers,
        }
    }

    /// Ordinal of `map`; 0, which matches no map, when it is not declared.
    fn ordinal(&self, map: &str) -> u32 {
        self.maps.ordinal(map).unwrap_or_else(|| {
            log::warn!("{}: map {map} is not declared in mapinfo", self.script.name);
            0
        })
    }

    fn animation_layer(&mut self) -> Layer {
        let script = self.script;
        let anims = script
            .animations
            .iter()
            .map(|animation| self.animation(animation))
            .collect();
        Layer {
            anims,
            conditions: None,
        }
    }

    fn animation(&mut self, animation: &ScriptAnimation) -> Anim {
        let duration = Frame::tics_to_seconds(animation.speed_tics.unwrap_or(0));
        let holds = animation.once || animation.speed_tics.is_none();

        let last = animation.patches.len().saturating_sub(1);
        let frames = animation
            .patches
            .iter()
            .enumerate()
            .map(|(i, patch)| {
                let frame = if i == last && holds {
                    Frame::infinite(patch.as_str())
                } else {
                    Frame::fixed(patch.as_str(), duration)
                };
                self.pool.frame(frame)
            })
            .collect();

        let conditions = match &animation.guard {
            Guard::None => Vec::new(),
            Guard::Entering(map) => vec![Condition::current(self.ordinal(map)), Condition::entering()],
            Guard::Leaving(map) => vec![Condition::current(self.ordinal(map)), Condition::leaving()],
            Guard::Visited(map) => vec![Condition::visited(self.ordinal(map))],
        };

        Anim {
            x: animation.x,
            y: animation.y,
            frames,
            conditions: self.pool.conditions(&conditions),
        }
    }

    /// The splat layer marks visited maps, the arrow layer blinks on the
    /// current one. A map's literal enter/exit picture replaces the splat
    /// or arrow and covers the whole screen. Without a splat or pointer
    /// image the spots that need one are left out of that layer.
    fn spot_layers(&mut self) -> (Layer, Layer) {
        let (script, maps) = (self.script, self.maps);
        let mut splats = Vec::new();
        let mut arrows = Vec::new();

        if script.splat.is_none() {
            log::warn!("{}: spots without a SPLAT image", script.name);
        }
        if script.pointers.is_none() {
            log::warn!("{}: spots without a POINTER image", script.name);
        }

        for (map, spot) in &script.spots {
            let ordinal = self.ordinal(map);
            let info = maps.find(map);

            let splat = match (info.and_then(|i| i.enterpic.as_deref()), script.splat.as_deref()) {
                (Some(pic), _) => Some((0, 0, self.pool.frame(Frame::infinite(pic)))),
                (None, Some(splat)) => Some((spot.x, spot.y, self.pool.frame(Frame::infinite(splat)))),
                (None, None) => None,
            };
            if let Some((x, y, frame)) = splat {
                splats.push(Anim {
                    x,
                    y,
                    frames: vec![frame],
                    conditions: self.pool.conditions(&[Condition::visited(ordinal)]),
                });
            }

            let arrow = match info.and_then(|i| i.exitpic.as_deref()) {
                Some(pic) => Some((0, 0, vec![self.pool.frame(Frame::infinite(pic))])),
                None => self.pointer_frames(spot.x).map(|frames| (spot.x, spot.y, frames)),
            };
            if let Some((x, y, frames)) = arrow {
                arrows.push(Anim {
                    x,
                    y,
                    frames,
                    conditions: self.pool.conditions(&[Condition::current(ordinal)]),
                });
            }
        }

        let entering = self.pool.conditions(&[Condition::entering()]);
        (
            Layer {
                anims: splats,
                conditions: entering.clone(),
            },
            Layer {
                anims: arrows,
                conditions: entering,
            },
        )
    }

    fn pointer_frames(&mut self, x: i32) -> Option<Vec<Rc<Frame>>> {
        let script = self.script;
        let (left, right) = script.pointers.as_ref()?;
        let pointer = if x > POINTER_FLIP_X { right } else { left };
        Some(vec![
            self.pool.frame(Frame::fixed(pointer.as_str(), POINTER_SHOWN_SECONDS)),
            self.pool.frame(Frame::fixed(EMPTY_PATCH, POINTER_HIDDEN_SECONDS)),
        ])
    }
}

/// Build the interlevel data of `script` against the map table.
pub fn build_interlevel(
    script: &IntermissionScript,
    maps: &MapTable,
    music: Option<&str>,
) -> InterlevelData {
    InterlevelBuilder::new(script, maps).build(music)
}
