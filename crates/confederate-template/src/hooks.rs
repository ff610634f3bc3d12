//! Extension points run between setup and constituent processing.

use crate::context::GenerationContext;
use crate::error::TemplateError;
use crate::templater::Templater;

/// Project-kind-specific generation behaviour.
///
/// `on_setup` runs after the well-known variables are seeded; `on_write` runs
/// before constituents are processed. Both default to doing nothing.
pub trait TemplateHooks {
    /// Adjust the environment once setup has finished.
    fn on_setup(
        &self,
        _context: &mut GenerationContext,
        _templater: &Templater,
    ) -> Result<(), TemplateError> {
        Ok(())
    }

    /// Write kind-specific files into the project directory.
    fn on_write(
        &self,
        _context: &mut GenerationContext,
        _templater: &Templater,
    ) -> Result<(), TemplateError> {
        Ok(())
    }
}

type HookFn<'a> = Box<dyn Fn(&mut GenerationContext, &Templater) -> Result<(), TemplateError> + 'a>;

/// Hooks built from a pair of closures.
#[derive(Default)]
pub struct CallbackHooks<'a> {
    setup: Option<HookFn<'a>>,
    write: Option<HookFn<'a>>,
}

impl<'a> CallbackHooks<'a> {
    /// Hooks that do nothing until closures are attached.
    pub fn new() -> Self {
        Self {
            setup: None,
            write: None,
        }
    }

    /// Run `f` as the `on_setup` hook.
    pub fn on_setup<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut GenerationContext, &Templater) -> Result<(), TemplateError> + 'a,
    {
        self.setup = Some(Box::new(f));
        self
    }

    /// Run `f` as the `on_write` hook.
    pub fn on_write<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut GenerationContext, &Templater) -> Result<(), TemplateError> + 'a,
    {
        self.write = Some(Box::new(f));
        self
    }
}

impl TemplateHooks for CallbackHooks<'_> {
    fn on_setup(
        &self,
        context: &mut GenerationContext,
        templater: &Templater,
    ) -> Result<(), TemplateError> {
        match &self.setup {
            Some(f) => f(context, templater),
            None => Ok(()),
        }
    }

    fn on_write(
        &self,
        context: &mut GenerationContext,
        templater: &Templater,
    ) -> Result<(), TemplateError> {
        match &self.write {
            Some(f) => f(context, templater),
            None => Ok(()),
        }
    }
}
