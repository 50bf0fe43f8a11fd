//! Two-step delete confirmation.
//!
//! A secondary activation (right tap) on an element opens a context menu
//! with a single delete command. Choosing it opens a yes/no confirmation.
//! Only an affirmative answer on both steps emits
//! [`Notification::DeleteRequested`]; anything else aborts the flow without
//! side effects.
//!
//! The menu and the dialog are modal prompts owned by the host. They are
//! modeled as async methods so the flow suspends while the prompt is open
//! without blocking the event loop. No timeout is applied.

#![allow(async_fn_in_trait)]

use log::{debug, info};

use bpmm_core::{
    geometry::{Bounds, Point},
    identifier::ElementId,
};

use crate::{Element, config::PromptConfig, notification::Notification};

/// Presents a modal single-choice menu.
pub trait MenuPresenter {
    /// Shows `commands` next to `placement` (global coordinates) and resolves
    /// with the index of the chosen command, or `None` if dismissed.
    async fn show_for_selection(&self, commands: &[&str], placement: Bounds) -> Option<usize>;
}

/// Presents a modal yes/no confirmation dialog.
pub trait ConfirmationPresenter {
    /// Resolves with the user's answer; dismissal counts as [`Confirmation::Declined`].
    async fn confirm(&self, prompt: &ConfirmationPrompt<'_>) -> Confirmation;
}

/// Converts element-local coordinates to global (screen) coordinates.
pub trait CoordinateTransform {
    fn to_global(&self, element: ElementId, local: Point) -> Point;
}

/// Wording of a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPrompt<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub affirm_label: &'a str,
    pub cancel_label: &'a str,
}

/// Answer to a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Affirmed,
    Declined,
}

/// How a delete flow finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Both steps were affirmed and `DeleteRequested` was emitted.
    Requested,
    /// The context menu was dismissed without choosing delete.
    MenuDismissed,
    /// The confirmation dialog was declined.
    Declined,
}

/// The collaborators and wording used by a delete flow.
pub struct DeleteFlow<'a, M, C, T> {
    menu: &'a M,
    confirmation: &'a C,
    transform: &'a T,
    prompts: &'a PromptConfig,
}

impl<'a, M, C, T> DeleteFlow<'a, M, C, T>
where
    M: MenuPresenter,
    C: ConfirmationPresenter,
    T: CoordinateTransform,
{
    pub fn new(menu: &'a M, confirmation: &'a C, transform: &'a T, prompts: &'a PromptConfig) -> Self {
        Self {
            menu,
            confirmation,
            transform,
            prompts,
        }
    }

    /// Runs the flow for `element`.
    pub async fn run(&self, element: &mut Element) -> DeleteOutcome {
        let placement = self.menu_placement(element);
        let commands = [self.prompts.delete_label()];

        let selection = self.menu.show_for_selection(&commands, placement).await;
        if selection != Some(0) {
            debug!(id:% = element.id(); "Delete menu dismissed");
            return DeleteOutcome::MenuDismissed;
        }

        let prompt = ConfirmationPrompt {
            title: self.prompts.confirm_title(),
            message: self.prompts.confirm_message(),
            affirm_label: self.prompts.ok_label(),
            cancel_label: self.prompts.cancel_label(),
        };
        match self.confirmation.confirm(&prompt).await {
            Confirmation::Affirmed => {
                info!(id:% = element.id(), category:% = element.category(); "Delete requested");
                element.emit(Notification::DeleteRequested);
                DeleteOutcome::Requested
            }
            Confirmation::Declined => {
                debug!(id:% = element.id(); "Delete declined");
                DeleteOutcome::Declined
            }
        }
    }

    fn menu_placement(&self, element: &Element) -> Bounds {
        let origin = self.transform.to_global(element.id(), Point::default());
        Bounds::new_from_top_left(origin, element.rendered_size())
    }
}

impl Element {
    /// Secondary activation: runs the two-step delete confirmation.
    pub async fn on_secondary_tapped<M, C, T>(&mut self, flow: &DeleteFlow<'_, M, C, T>) -> DeleteOutcome
    where
        M: MenuPresenter,
        C: ConfirmationPresenter,
        T: CoordinateTransform,
    {
        flow.run(self).await
    }
}
