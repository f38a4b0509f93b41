//! Form → Preview → Form navigation
//!
//! Transitions only happen through these methods; export borrows the session
//! immutably, so a failed export cannot disturb it.

use log::debug;

use crate::error::{Error, Result};
use crate::export::{PrintJob, PrintSurface};
use crate::model::{AgencyProfile, Booking};
use crate::printable::{RenderOptions, Renderer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Form,
    Preview(Booking),
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::Form => "form",
            Screen::Preview(_) => "preview",
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    screen: Screen,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The booking on display, if any
    pub fn current(&self) -> Option<&Booking> {
        match &self.screen {
            Screen::Preview(b) => Some(b),
            Screen::Form => None,
        }
    }

    pub fn generate(&mut self, booking: Booking) -> Result<()> {
        if !matches!(self.screen, Screen::Form) {
            return Err(self.invalid("generate"));
        }
        debug!("Showing {} preview for {}", booking.kind(), booking.reference());
        self.screen = Screen::Preview(booking);
        Ok(())
    }

    /// Discards the booking on display
    pub fn back_to_form(&mut self) -> Result<()> {
        if matches!(self.screen, Screen::Form) {
            return Err(self.invalid("back"));
        }
        self.screen = Screen::Form;
        Ok(())
    }

    pub fn export<S: PrintSurface + ?Sized>(
        &self,
        renderer: &Renderer,
        agency: &AgencyProfile,
        options: RenderOptions,
        surface: &mut S,
    ) -> Result<PrintJob> {
        let booking = self.current().ok_or_else(|| self.invalid("export"))?;
        let html = renderer.render_printable(booking, agency, options)?;
        surface.print(booking, &html)
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            screen: self.screen.name(),
        }
    }
}
