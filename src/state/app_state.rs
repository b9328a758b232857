use crate::content::SiteContent;
use crate::form::{ContactField, ContactForm};
use crate::reveal::{Bounds, REVEAL_THRESHOLD, RevealOnView, Viewport, ViewportSource};
use crate::runtime::command::Command;
use crate::runtime::scheduler::SchedulerCommand;
use crate::section::{ElementId, SectionId};
use crate::state::contact::ContactSection;
use crate::task::Submitter;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

pub const TOAST_DURATION: Duration = Duration::from_secs(5);
const TOAST_KEY: &str = "toast";

/// Everything the interactive site knows: content, scroll position, the
/// reveal registry, the contact form and transient notifications.
pub struct AppState {
    content: SiteContent,
    year: i32,
    contact: ContactSection,
    reveal: RevealOnView<ElementId>,
    layout: IndexMap<ElementId, Bounds>,
    field_bounds: BTreeMap<ContactField, Bounds>,
    page_height: usize,
    scroll: usize,
    viewport_height: usize,
    carousel: usize,
    toast: Option<String>,
    pending_scheduler_commands: Vec<SchedulerCommand>,
    should_exit: bool,
}

impl AppState {
    pub fn new<S>(content: SiteContent, year: i32, submitter: S) -> Self
    where
        S: Submitter<ContactForm> + 'static,
    {
        let mut state = Self {
            content,
            year,
            contact: ContactSection::new(submitter),
            reveal: RevealOnView::new(),
            layout: IndexMap::new(),
            field_bounds: BTreeMap::new(),
            page_height: 0,
            scroll: 0,
            viewport_height: 0,
            carousel: 0,
            toast: None,
            pending_scheduler_commands: Vec::new(),
            should_exit: false,
        };
        state.mount();
        state
    }

    /// Registers every revealing section, and the items of list sections,
    /// with the reveal registry.
    fn mount(&mut self) {
        for section in SectionId::ALL.into_iter().filter(|s| s.reveals()) {
            self.reveal.watch(ElementId::Section(section), REVEAL_THRESHOLD);
            if section.watches_items() {
                for index in 0..self.item_count(section) {
                    self.reveal
                        .watch(ElementId::Item(section, index), REVEAL_THRESHOLD);
                }
            }
        }
        debug!(watching = self.reveal.watching_count(), "page mounted");
    }

    /// Releases every reveal watch, fired or not.
    pub fn teardown(&mut self) {
        let watched: Vec<ElementId> = self.mounted_elements().collect();
        for element in &watched {
            self.reveal.unwatch(element);
        }
        debug!(released = watched.len(), "page torn down");
    }

    fn mounted_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        SectionId::ALL
            .into_iter()
            .filter(|s| s.reveals())
            .flat_map(move |section| {
                let items = if section.watches_items() {
                    self.item_count(section)
                } else {
                    0
                };
                std::iter::once(ElementId::Section(section))
                    .chain((0..items).map(move |idx| ElementId::Item(section, idx)))
            })
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contact(&self) -> &ContactSection {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactSection {
        &mut self.contact
    }

    pub fn reveal(&self) -> &RevealOnView<ElementId> {
        &self.reveal
    }

    pub fn item_count(&self, section: SectionId) -> usize {
        match section {
            SectionId::Highlights => self.content.highlights.items.len(),
            SectionId::Skills => self.content.skills.items.len(),
            SectionId::Experience => self.content.experience.items.len(),
            SectionId::Certifications => self.content.certifications.items.len(),
            _ => 0,
        }
    }

    /// Whether `element` is drawn. Header and footer always are; others
    /// once revealed and their stagger delay has passed.
    pub fn is_shown(&self, element: ElementId, now: Instant) -> bool {
        if !element.section().reveals() {
            return true;
        }
        self.reveal
            .revealed_at(&element)
            .is_some_and(|at| now.saturating_duration_since(at) >= element.stagger())
    }

    /// True while some revealed element is still waiting out its stagger,
    /// or a submission spinner is running.
    pub fn is_animating(&self, now: Instant) -> bool {
        if self.contact.form().is_submitting() {
            return true;
        }
        self.layout
            .keys()
            .any(|element| self.reveal.is_revealed(element) && !self.is_shown(*element, now))
    }

    // Layout and scrolling

    pub fn set_layout(
        &mut self,
        layout: IndexMap<ElementId, Bounds>,
        field_bounds: BTreeMap<ContactField, Bounds>,
        page_height: usize,
    ) {
        self.layout = layout;
        self.field_bounds = field_bounds;
        self.page_height = page_height;
        self.clamp_scroll();
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp_scroll();
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll, self.viewport_height)
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn max_scroll(&self) -> usize {
        self.page_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_by(&mut self, rows: i32) {
        let target = if rows < 0 {
            self.scroll.saturating_sub(rows.unsigned_abs() as usize)
        } else {
            self.scroll.saturating_add(rows as usize)
        };
        self.scroll = target.min(self.max_scroll());
    }

    pub fn scroll_pages(&mut self, pages: i32) {
        let page = self.viewport_height.saturating_sub(1).max(1) as i32;
        self.scroll_by(pages.saturating_mul(page));
    }

    pub fn scroll_to(&mut self, row: usize) {
        self.scroll = row.min(self.max_scroll());
    }

    pub fn jump_to(&mut self, section: SectionId) {
        if let Some(bounds) = self.layout.get(&ElementId::Section(section)) {
            debug!(%section, row = bounds.top, "jump to section");
            self.scroll_to(bounds.top);
        }
    }

    /// The section under the top row of the viewport.
    pub fn current_section(&self) -> SectionId {
        SectionId::NAV
            .iter()
            .rev()
            .find(|section| {
                self.layout
                    .get(&ElementId::Section(**section))
                    .is_some_and(|bounds| bounds.top <= self.scroll)
            })
            .copied()
            .unwrap_or(SectionId::Hero)
    }

    /// Runs the intersection pass against the current viewport.
    pub fn sweep_reveals(&mut self, now: Instant) -> Vec<ElementId> {
        let source = ViewportSource::new(self.viewport(), &self.layout);
        self.reveal.sweep(&source, now)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn ensure_field_visible(&mut self, field: ContactField) {
        let Some(bounds) = self.field_bounds.get(&field).copied() else {
            return;
        };
        let viewport = self.viewport();
        if bounds.top < viewport.offset {
            self.scroll_to(bounds.top);
        } else if bounds.bottom() > viewport.bottom() {
            self.scroll_to(bounds.bottom().saturating_sub(self.viewport_height));
        }
    }

    // Contact form

    pub fn focus_next(&mut self) {
        self.contact.focus_next();
        self.follow_focus();
    }

    pub fn focus_prev(&mut self) {
        self.contact.focus_prev();
        self.follow_focus();
    }

    pub fn clear_focus(&mut self) -> bool {
        if self.contact.focus().is_some() {
            self.contact.set_focus(None);
            return true;
        }
        if self.toast.is_some() {
            self.dismiss_toast();
            self.pending_scheduler_commands.push(SchedulerCommand::Cancel {
                key: TOAST_KEY.to_string(),
            });
            return true;
        }
        false
    }

    pub fn follow_focus(&mut self) {
        if let Some(field) = self.contact.focus() {
            self.ensure_field_visible(field);
        }
    }

    /// Collects a settled submission; returns true when the screen changed.
    pub fn poll_submission(&mut self) -> bool {
        let was_submitting = self.contact.form().is_submitting();
        if let Some(message) = self.contact.poll() {
            self.show_toast(message);
            return true;
        }
        was_submitting && !self.contact.form().is_submitting()
    }

    // Certifications carousel

    pub fn carousel_index(&self) -> usize {
        self.carousel
    }

    pub fn carousel_step(&mut self, delta: isize) {
        let len = self.content.certifications.items.len();
        if len == 0 {
            return;
        }
        self.carousel = (self.carousel as isize + delta).rem_euclid(len as isize) as usize;
    }

    // Notifications

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast = Some(message);
        self.pending_scheduler_commands.push(SchedulerCommand::Debounce {
            key: TOAST_KEY.to_string(),
            delay: TOAST_DURATION,
            command: Command::DismissToast,
        });
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn take_pending_scheduler_commands(&mut self) -> Vec<SchedulerCommand> {
        std::mem::take(&mut self.pending_scheduler_commands)
    }

    // Lifecycle

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }
}
