use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::core::{ExpansionState, Granularity, Item, ItemId, Viewport, tree_ids};
use crate::error::{GanttError, GanttResult};
use crate::render::{RenderFrame, Renderer};

use super::{
    GanttEngineConfig, LayoutConfig, RenderModel, TimelineRenderStyle, build_render_frame,
    compute_layout,
};

/// Interactive timeline session.
///
/// Owns the items and the only state that survives between layout passes:
/// the current granularity and the expansion set. Every query recomputes the
/// render model from scratch.
///
/// Ids start expanded the first time they are seen; after that only
/// `toggle_expansion` changes their state, even across `set_items`.
pub struct GanttEngine<R: Renderer> {
    renderer: R,
    viewport: Viewport,
    layout_config: LayoutConfig,
    render_style: TimelineRenderStyle,
    granularity: Granularity,
    items: Vec<Item>,
    expansion: ExpansionState,
    seen_ids: IndexSet<ItemId>,
}

impl<R: Renderer> GanttEngine<R> {
    pub fn new(renderer: R, config: GanttEngineConfig) -> GanttResult<Self> {
        if !config.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        let layout_config = config.layout.validate()?;
        layout_config.row_mode.ensure_supports(config.granularity)?;

        Ok(Self {
            renderer,
            viewport: config.viewport,
            layout_config,
            render_style: TimelineRenderStyle::default(),
            granularity: config.granularity,
            items: Vec::new(),
            expansion: ExpansionState::collapsed(),
            seen_ids: IndexSet::new(),
        })
    }

    /// Replaces the item set. Ids not seen before in this session start
    /// expanded; known ids keep whatever state the user left them in.
    pub fn set_items(&mut self, items: Vec<Item>) {
        let mut new_ids = 0usize;
        for id in tree_ids(&items) {
            if self.seen_ids.contains(&id) {
                continue;
            }
            if !self.expansion.is_expanded(&id) {
                self.expansion.toggle(&id);
            }
            self.seen_ids.insert(id);
            new_ids += 1;
        }
        debug!(
            top_level = items.len(),
            new_ids,
            expanded = self.expansion.len(),
            "set timeline items"
        );
        self.items = items;
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Switches the zoom level. Flat and grouped layouts reject quarter/year.
    pub fn set_granularity(&mut self, granularity: Granularity) -> GanttResult<()> {
        self.layout_config.row_mode.ensure_supports(granularity)?;
        trace!(from = %self.granularity, to = %granularity, "set granularity");
        self.granularity = granularity;
        Ok(())
    }

    /// Flips one node between expanded and collapsed. Returns the new state.
    pub fn toggle_expansion(&mut self, id: &ItemId) -> bool {
        let expanded = self.expansion.toggle(id);
        trace!(item_id = %id, expanded, "toggle expansion");
        expanded
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> GanttResult<()> {
        if !viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    /// Replaces layout tuning. The current granularity must stay valid for
    /// the new row mode.
    pub fn set_layout_config(&mut self, config: LayoutConfig) -> GanttResult<()> {
        let config = config.validate()?;
        config.row_mode.ensure_supports(self.granularity)?;
        self.layout_config = config;
        Ok(())
    }

    #[must_use]
    pub fn render_style(&self) -> TimelineRenderStyle {
        self.render_style
    }

    pub fn set_render_style(&mut self, style: TimelineRenderStyle) -> GanttResult<()> {
        self.render_style = style.validate()?;
        Ok(())
    }

    /// Full layout pass over the current inputs.
    pub fn layout(&self) -> GanttResult<RenderModel> {
        compute_layout(
            &self.items,
            self.granularity,
            &self.expansion,
            &self.layout_config,
        )
    }

    pub fn build_render_frame(&self) -> GanttResult<RenderFrame> {
        let model = self.layout()?;
        build_render_frame(
            &model,
            self.viewport,
            &self.layout_config,
            &self.render_style,
        )
    }

    pub fn render(&mut self) -> GanttResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
