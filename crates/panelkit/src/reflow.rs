#![forbid(unsafe_code)]

//! Layout reflow: fitting sub-panels side by side into an outer frame.
//!
//! The outer frame width is shared out among the sub-panels, every
//! sub-panel is resized, and then single sub-panels are narrowed (or
//! widened) one step at a time until the grid matches the frame width or
//! nothing changes any more. Afterwards heights are reduced to what the
//! sub-panels need and panels with cramped titles get any width left.
//!
//! Sub-panels that arrive already resized keep their laid-out content;
//! only their frames change.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use panelkit_core::{DefinedDims, Dimensions, Frame, OutputConfig, RenderError};
use panelkit_text::ELLIPSIS;
use smallvec::SmallVec;
use tracing::{debug, debug_span, trace, warn};

use crate::grid::grid_width;
use crate::layout::Layout;
use crate::panel::{DraftPanel, Panel, ResizedPanel};

/// Upper bound on resize steps. Every step changes some sub-panel, so this
/// is only reached if the steps cycle.
const MAX_RESIZE_STEPS: usize = 1000;

/// Border rows above and below the cells.
const GRID_BORDER_ROWS: usize = 2;

/// Reflow the sub-panels of `layout` into `frame`.
///
/// Returns a layout of the same keys (or fewer, with `min_crop_width`)
/// where every panel is resized.
pub(crate) fn reflow(
    layout: &Layout,
    frame: &Frame,
    config: &OutputConfig,
) -> Result<Layout, RenderError> {
    let _span = debug_span!(
        "reflow",
        panels = layout.len(),
        width = ?frame.width(),
        height = ?frame.height(),
    )
    .entered();

    let originals: Vec<&Panel> = layout.panels().collect();
    let keys: Vec<String> = layout.keys().map(str::to_string).collect();

    let mut prepared: Vec<Panel> = originals.iter().map(|p| (*p).clone()).collect();
    if let Some(width) = frame.width() {
        distribute_width(&mut prepared, width);
    }
    if let Some(height) = frame.height() {
        let inner = height.saturating_sub(GRID_BORDER_ROWS);
        for panel in &mut prepared {
            if !panel.frame().fixed_height() {
                let frame = panel.frame().with_height(Some(inner)).with_fixed_height(false);
                *panel = set_frame(panel, frame);
            }
        }
    }

    let mut state = Reflow {
        originals,
        panels: prepared
            .iter()
            .map(resolve)
            .collect::<Result<Vec<_>, _>>()?,
        resizable: layout
            .panels()
            .enumerate()
            .filter(|(_, p)| matches!(p, Panel::Draft(d) if !d.frame().fixed_width()))
            .map(|(i, _)| i)
            .collect(),
    };

    state.tighten();
    if let Some(width) = frame.width()
        && state.panels.len() > 1
    {
        state.resize(width)?;
    }

    if frame.height().is_some() {
        for panel in &mut state.panels {
            if !panel.frame().fixed_height() {
                let height = panel.outer_dims().height;
                *panel = panel.with_frame(panel.frame().with_height(Some(height)));
            }
        }
    }

    if let Some(width) = frame.width() {
        state.tighten();
        state.widen_cramped_titles(width);
    }

    let mut entries: Vec<(String, ResizedPanel)> = keys.into_iter().zip(state.panels).collect();
    if let Some(min_width) = config.min_crop_width() {
        entries = replace_narrow_panels(entries, min_width, config)?;
    }

    debug!(
        widths = ?entries.iter().map(|(_, p)| p.outer_dims().width).collect::<Vec<_>>(),
        "reflow done"
    );
    Ok(entries.into_iter().collect())
}

/// Give every draft without a frame width an equal share of `width`.
fn distribute_width(panels: &mut [Panel], width: usize) {
    let mut preset = 0;
    let mut unset = 0;
    for panel in panels.iter() {
        match (panel.frame().width(), panel) {
            (Some(w), _) => preset += w + 3,
            (None, Panel::Draft(_)) => unset += 1,
            (None, other) => preset += other.resized().map_or(0, |r| r.dims().width) + 3,
        }
    }
    if unset == 0 {
        return;
    }

    let share = (width.saturating_sub(preset + 1) / unset).saturating_sub(3);
    trace!(share, unset, preset, "distributing width");
    for panel in panels.iter_mut() {
        if let Panel::Draft(draft) = panel
            && draft.frame().width().is_none()
        {
            let frame = draft
                .frame()
                .with_width(Some(share))
                .with_fixed_width(false);
            *panel = Panel::Draft(draft.clone().with_frame(frame));
        }
    }
}

fn set_frame(panel: &Panel, frame: Frame) -> Panel {
    match panel {
        Panel::Draft(draft) => Panel::Draft(draft.clone().with_frame(frame)),
        Panel::Resized(resized) => Panel::Resized(resized.with_frame(frame)),
        Panel::Stylized(stylized) => Panel::Resized(stylized.resized().with_frame(frame)),
    }
}

fn resolve(panel: &Panel) -> Result<ResizedPanel, RenderError> {
    match panel {
        Panel::Draft(draft) => draft.render_next_stage(),
        Panel::Resized(resized) => Ok(resized.clone()),
        Panel::Stylized(stylized) => Ok(stylized.resized().clone()),
    }
}

/// Cropped-content size of the grid, used while resizing.
fn cropped_grid_dims(panels: &[ResizedPanel]) -> DefinedDims {
    let total = panels.iter().fold(DefinedDims::ZERO, |acc, p| {
        let d = p.cropped_dims();
        DefinedDims::new(acc.width + d.width, acc.height.max(d.height))
    });
    DefinedDims::new(
        grid_width(total.width, panels.len()),
        total.height + GRID_BORDER_ROWS,
    )
}

type SortKey = (usize, i64, i64, i64);

struct Reflow<'a> {
    /// Sub-panels as given, before any frame was assigned.
    originals: Vec<&'a Panel>,
    panels: Vec<ResizedPanel>,
    /// Indices of sub-panels that may still be narrowed.
    resizable: BTreeSet<usize>,
}

impl Reflow<'_> {
    /// Narrow flexible frame widths to the content width.
    fn tighten(&mut self) {
        for panel in &mut self.panels {
            let frame = *panel.frame();
            if let Some(width) = frame.width()
                && !frame.fixed_width()
            {
                let tight = frame.crop_width(panel.dims().width);
                if tight != width {
                    *panel = panel.with_frame(frame.with_width(Some(tight)));
                }
            }
        }
    }

    fn sort_key(&self, idx: usize) -> SortKey {
        let panel = &self.panels[idx];
        let frame = panel.frame();
        let resizable = self.resizable.contains(&idx);
        let height = if !resizable {
            usize::MAX
        } else if frame.fixed_height() {
            frame.crop_height_ignore_fixed(panel.dims().height)
        } else {
            panel.dims().height
        };
        let frame_width = match frame.width() {
            Some(w) if resizable => -(w as i64),
            _ => i64::MAX,
        };
        (
            height,
            frame_width,
            -(panel.cropped_dims().width as i64),
            -(idx as i64),
        )
    }

    /// Sub-panel indices in the order a step of `delta` tries them.
    ///
    /// Narrowing starts with the shortest panel, then the widest frame,
    /// then the widest content, then the rightmost. Widening is the
    /// reverse.
    fn step_order(&self, delta: i64) -> SmallVec<[usize; 8]> {
        let mut order: SmallVec<[usize; 8]> = (0..self.panels.len()).collect();
        order.sort_by_key(|&i| self.sort_key(i));
        if delta > 0 {
            order.reverse();
        }
        order
    }

    /// Step sub-panel widths towards `width` until nothing changes.
    fn resize(&mut self, width: usize) -> Result<(), RenderError> {
        let _span = debug_span!("resize_loop", width).entered();
        let count = self.panels.len();

        for step in 0.. {
            if step == MAX_RESIZE_STEPS {
                warn!(step, "reflow did not settle, keeping current widths");
                break;
            }

            let dims = cropped_grid_dims(&self.panels);
            let delta = width as i64 - dims.width as i64;
            trace!(step, grid_width = dims.width, delta, "reflow step");
            if delta == 0 {
                break;
            }
            let before = (dims, self.resizable.clone());

            let order = self.step_order(delta);
            let total_cropped: usize = self.panels.iter().map(|p| p.cropped_dims().width).sum();
            let min_frame_width = if total_cropped <= count { 0 } else { 1 };

            for idx in order {
                if self.step_panel(idx, delta, min_frame_width)? {
                    break;
                }
            }

            let after = (cropped_grid_dims(&self.panels), self.resizable.clone());
            if after == before {
                break;
            }
        }
        Ok(())
    }

    /// Try a new frame width for one sub-panel. Returns true when the
    /// layout changed and the step is over.
    fn step_panel(
        &mut self,
        idx: usize,
        delta: i64,
        min_frame_width: usize,
    ) -> Result<bool, RenderError> {
        let original = self.originals[idx];
        let original_frame = *original.frame();
        let current = &self.panels[idx];
        let current_cropped = current.cropped_dims();

        let change = if delta > 0 { delta } else { -1 };
        let mut frame_width = (current_cropped.width as i64 + change).max(min_frame_width as i64)
            as usize;
        if original_frame.fixed_width() {
            frame_width = original_frame.crop_width_ignore_fixed(frame_width);
        }
        let mut new_frame = original_frame
            .with_width(Some(frame_width))
            .with_height(current.frame().height());
        if original_frame.width().is_none() {
            new_frame = new_frame.with_fixed_width(false);
        }

        if new_frame == *current.frame() || original_frame.fixed_width() {
            return Ok(false);
        }

        let candidate = match original {
            Panel::Draft(draft) => draft.clone().with_frame(new_frame).render_next_stage()?,
            Panel::Resized(_) | Panel::Stylized(_) => current.with_frame(new_frame),
        };
        let candidate_cropped = candidate.cropped_dims();
        let same = candidate_cropped == current_cropped;
        let tightened = matches!(
            (new_frame.width(), current.frame().width()),
            (Some(new), Some(old)) if new < old
        );

        if self.resizable.contains(&idx) {
            if delta < 0 && tightened && same {
                trace!(idx, "panel no longer shrinks");
                self.resizable.remove(&idx);
                return Ok(true);
            }
        } else if candidate_cropped.width > current_cropped.width {
            self.resizable.insert(idx);
        }

        if same {
            return Ok(false);
        }
        let grown = candidate_cropped.width.saturating_sub(current_cropped.width);
        if delta > 0 && grown as i64 > delta {
            return Ok(false);
        }
        trace!(
            idx,
            frame_width,
            width = candidate_cropped.width,
            height = candidate_cropped.height,
            "panel resized"
        );
        self.panels[idx] = candidate;
        Ok(true)
    }

    /// Hand out width left in `width` to panels whose title is wider than
    /// their content, one column at a time, shortest titles first.
    fn widen_cramped_titles(&mut self, width: usize) {
        let total: usize = self.panels.iter().map(|p| p.outer_dims().width).sum();
        let mut left = width.saturating_sub(grid_width(total, self.panels.len()));

        let mut groups: BTreeMap<usize, VecDeque<usize>> = BTreeMap::new();
        for (idx, panel) in self.panels.iter().enumerate() {
            let frame = panel.frame();
            if panel.title_width() > 0
                && panel.title_height() > 0
                && frame.width().is_some()
                && !frame.fixed_width()
                && panel.cropped_dims().width < panel.title_width()
            {
                groups.entry(panel.title_width()).or_default().push_back(idx);
            }
        }

        let mut added = vec![0usize; self.panels.len()];
        while left > 0 {
            let Some(mut group) = groups.first_entry() else {
                break;
            };
            let title_width = *group.key();
            let queue = group.get_mut();
            let Some(idx) = queue.pop_front() else {
                group.remove();
                continue;
            };
            added[idx] += 1;
            left -= 1;
            if self.panels[idx].cropped_dims().width + added[idx] < title_width {
                queue.push_back(idx);
            }
            if queue.is_empty() {
                group.remove();
            }
        }

        for (panel, add) in self.panels.iter_mut().zip(added) {
            if add > 0 {
                let frame = panel
                    .frame()
                    .with_width(Some(panel.cropped_dims().width + add))
                    .with_fixed_width(true);
                trace!(add, title_width = panel.title_width(), "widening for title");
                *panel = panel.with_frame(frame);
            }
        }
    }
}

/// Replace sub-panels narrower than `min_width` by a `…` placeholder.
///
/// The first sub-panel is always kept, and runs of replaced sub-panels
/// share one placeholder.
fn replace_narrow_panels(
    entries: Vec<(String, ResizedPanel)>,
    min_width: usize,
    config: &OutputConfig,
) -> Result<Vec<(String, ResizedPanel)>, RenderError> {
    let placeholder = DraftPanel::new(ELLIPSIS.to_string())
        .with_frame(Frame::new(Dimensions::width_only(1), true, false))
        .with_config(config.clone())
        .render_next_stage()?;
    let mut out: Vec<(String, ResizedPanel)> = Vec::with_capacity(entries.len());
    let mut previous_replaced = false;
    for (idx, (key, panel)) in entries.into_iter().enumerate() {
        if idx > 0 && panel.cropped_dims().width < min_width {
            if !previous_replaced {
                trace!(key = %key, "replacing narrow panel by placeholder");
                out.push((key, placeholder.clone()));
            }
            previous_replaced = true;
        } else {
            out.push((key, panel));
            previous_replaced = false;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> DraftPanel {
        DraftPanel::new(text)
    }

    fn widths(layout: &Layout) -> Vec<usize> {
        layout
            .panels()
            .filter_map(Panel::resized)
            .map(|p| p.outer_dims().width)
            .collect()
    }

    fn reflowed(layout: &Layout, frame: Frame) -> Layout {
        reflow(layout, &frame, &OutputConfig::default()).unwrap()
    }

    // ====================================================================
    // Distribution
    // ====================================================================

    #[test]
    fn width_is_shared_among_unset_panels() {
        let mut panels = vec![
            Panel::from(draft("a")),
            Panel::from(draft("b").with_frame(Frame::sized(4, 1))),
            Panel::from(draft("c")),
        ];
        distribute_width(&mut panels, 30);
        // (30 - 7 - 1) / 2 - 3
        assert_eq!(panels[0].frame().width(), Some(8));
        assert_eq!(panels[1].frame().width(), Some(4));
        assert_eq!(panels[2].frame().width(), Some(8));
    }

    #[test]
    fn share_never_goes_negative() {
        let mut panels = vec![Panel::from(draft("a")), Panel::from(draft("b"))];
        distribute_width(&mut panels, 3);
        assert_eq!(panels[0].frame().width(), Some(0));
    }

    // ====================================================================
    // Resizing
    // ====================================================================

    #[test]
    fn unbounded_frame_keeps_natural_widths() {
        let layout = Layout::new().with("a", draft("Some text here")).with("b", draft("xy"));
        let out = reflowed(&layout, Frame::UNBOUNDED);
        assert_eq!(widths(&out), vec![14, 2]);
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn preset_widths_are_tightened_without_outer_width() {
        let layout = Layout::new()
            .with("a", draft("abc").with_frame(Frame::flexible(Dimensions::width_only(10))))
            .with("b", draft("xy"));
        let out = reflowed(&layout, Frame::UNBOUNDED);
        let frame_widths: Vec<Option<usize>> = out
            .panels()
            .filter_map(Panel::resized)
            .map(|p| p.frame().width())
            .collect();
        assert_eq!(frame_widths, vec![Some(3), None]);
        assert_eq!(widths(&out), vec![3, 2]);
    }

    #[test]
    fn shared_width_wraps_text() {
        let layout = Layout::new()
            .with("a", draft("Some text here"))
            .with("b", draft("(1, 2, 3)"));
        let out = reflowed(&layout, Frame::sized(19, 5));
        assert_eq!(widths(&out), vec![4, 6]);
        let heights: Vec<usize> = out
            .panels()
            .filter_map(Panel::resized)
            .map(|p| p.frame().height().unwrap_or(0))
            .collect();
        assert_eq!(heights, vec![3, 2]);
    }

    #[test]
    fn too_wide_grid_narrows_panels() {
        let layout = Layout::new()
            .with("a", draft("aaa bbb ccc ddd"))
            .with("b", draft("x"));
        let out = reflowed(&layout, Frame::new(Dimensions::width_only(14), false, false));
        let total: usize = widths(&out).iter().sum();
        assert!(grid_width(total, 2) <= 14, "{:?}", widths(&out));
    }

    #[test]
    fn fixed_width_panels_keep_their_width() {
        let fixed = Frame::new(Dimensions::width_only(5), true, false);
        let layout = Layout::new()
            .with("a", draft("abc").with_frame(fixed))
            .with("b", draft("some longer text"));
        let out = reflowed(&layout, Frame::new(Dimensions::width_only(20), false, false));
        assert_eq!(widths(&out)[0], 5);
    }

    fn framed(text: &str, width: usize) -> Panel {
        Panel::from(draft(text).with_frame(Frame::flexible(Dimensions::width_only(width))))
    }

    fn state(originals: &[Panel]) -> Reflow<'_> {
        Reflow {
            originals: originals.iter().collect(),
            panels: originals.iter().map(|p| resolve(p).unwrap()).collect(),
            resizable: (0..originals.len()).collect(),
        }
    }

    fn cropped_widths(state: &Reflow<'_>) -> Vec<usize> {
        state.panels.iter().map(|p| p.cropped_dims().width).collect()
    }

    #[test]
    fn narrowing_takes_short_wide_panels_first() {
        let originals = [
            framed("aaaaaaaaaaaa", 12),
            framed("xx\nyy\nzz", 2),
            framed("cccccc", 6),
        ];
        let mut state = state(&originals);
        assert_eq!(cropped_widths(&state), vec![12, 2, 6]);
        // Equal heights: the wider frame goes first; the tall panel last.
        assert_eq!(state.step_order(-1).as_slice(), &[0, 2, 1]);
        assert_eq!(state.step_order(1).as_slice(), &[1, 2, 0]);

        state.resize(grid_width(14, 3)).unwrap();
        assert_eq!(cropped_widths(&state), vec![6, 2, 6]);

        // Same height, frame and content width: the rightmost goes first.
        assert_eq!(state.step_order(-1).as_slice(), &[2, 0, 1]);
        state.resize(grid_width(13, 3)).unwrap();
        assert_eq!(cropped_widths(&state), vec![6, 2, 5]);

        state.resize(grid_width(12, 3)).unwrap();
        assert_eq!(cropped_widths(&state), vec![5, 2, 5]);
    }

    // ====================================================================
    // Titles and placeholders
    // ====================================================================

    #[test]
    fn cramped_titles_are_widened() {
        let layout = Layout::new()
            .with("a", draft("ab").with_title("Title"))
            .with("b", draft("cd"));
        let out = reflowed(&layout, Frame::new(Dimensions::width_only(30), false, false));
        assert_eq!(widths(&out), vec![5, 2]);
    }

    #[test]
    fn narrow_panels_become_placeholders() {
        let config = OutputConfig::default().with_min_crop_width(Some(3));
        let layout = Layout::new()
            .with("a", draft("abcdef").with_frame(Frame::sized(6, 3)))
            .with("b", draft("x"))
            .with("c", draft("y"))
            .with("d", draft("long enough"));
        let out = reflow(&layout, &Frame::UNBOUNDED, &config).unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a", "b", "d"]);
        let placeholder = out.get("b").and_then(Panel::resized).unwrap();
        assert_eq!(placeholder.lines(), ["…"]);
        assert_eq!(placeholder.dims(), DefinedDims::new(1, 1));
    }
}
