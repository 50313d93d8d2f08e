use std::collections::BTreeMap;
use std::path::Path;

use minijinja::{context, path_loader, Environment, UndefinedBehavior};

use super::ScriptError;

/// Name of the install script template
pub const INSTALL_TEMPLATE: &str = "install.sh.j2";

const DEFAULT_INSTALL_TEMPLATE: &str = include_str!("../../templates/install.sh.j2");

/// Renders install scripts from the `install.sh.j2` template.
///
/// Autoescaping is off: the output is shell text, not HTML.
pub struct ScriptRenderer {
    env: Environment<'static>,
}

impl ScriptRenderer {
    /// Renderer backed by the built-in template
    pub fn builtin() -> Result<Self, ScriptError> {
        let mut env = base_environment();
        env.add_template(INSTALL_TEMPLATE, DEFAULT_INSTALL_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renderer loading `install.sh.j2` from `dir`. Fails early if the
    /// template is missing or does not parse.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ScriptError> {
        let mut env = base_environment();
        env.set_loader(path_loader(dir.as_ref().to_path_buf()));
        env.get_template(INSTALL_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the install template with the three bindings it expects.
    pub fn render(
        &self,
        programs: &[String],
        installs: &BTreeMap<String, Vec<String>>,
        os: &str,
    ) -> Result<String, ScriptError> {
        let template = self.env.get_template(INSTALL_TEMPLATE)?;
        let rendered = template.render(context! {
            programs => programs,
            installs => installs,
            os => os,
        })?;
        Ok(rendered)
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env
}
