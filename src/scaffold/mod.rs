//! Personalize a cloned template for the collected answers.
//!
//! Two files carry the UI framework choice: `package.json` (dependencies)
//! and `nuxt.config.ts` (module registration). Both are parsed before either
//! is written, so a malformed file aborts the rewrite with nothing touched.

pub mod manifest;
pub mod nuxt_config;
pub mod tailwind;

use anyhow::{Context, Result};
use std::path::Path;

use crate::answers::{SetupAnswers, UiFramework};
use crate::paths;
use crate::runner::CommandRunner;

pub use manifest::Manifest;
pub use nuxt_config::NuxtConfig;
pub use tailwind::TailwindReport;

/// Nuxt module that registers Vuetify.
pub const VUETIFY_MODULE: &str = "vuetify-nuxt-module";

/// Top-level `nuxt.config.ts` key holding Vuetify options.
pub const VUETIFY_OPTIONS_KEY: &str = "vuetify";

/// Manifest packages that only make sense with Vuetify.
pub const VUETIFY_PACKAGES: [&str; 2] = ["vuetify", VUETIFY_MODULE];

/// What a rewrite changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    pub removed_packages: Vec<String>,
    pub removed_module: bool,
    pub tailwind: Option<TailwindReport>,
}

/// Apply name, license and UI framework choices to the project at `root`.
///
/// Errors name the file involved; a Tailwind failure is wrapped as such.
pub fn rewrite(
    runner: &dyn CommandRunner,
    package_manager: &str,
    answers: &SetupAnswers,
    root: &Path,
) -> Result<RewriteReport> {
    let manifest_path = paths::project::package_json(root);
    let nuxt_path = paths::project::nuxt_config(root);

    let mut manifest = Manifest::load(&manifest_path)?;
    let mut nuxt = NuxtConfig::load(&nuxt_path)?;
    let mut report = RewriteReport::default();

    manifest.set_name(&answers.project_name);
    manifest.set_license(answers.license.spdx());

    match answers.ui_framework {
        UiFramework::Vuetify => {
            println!("🎨 Keeping Vuetify configuration as-is");
        }
        UiFramework::Tailwind | UiFramework::None => {
            println!("🧹 Removing Vuetify...");
            report.removed_module = drop_vuetify(&mut nuxt)?;
            for package in VUETIFY_PACKAGES {
                if manifest.remove_dependency(package) {
                    report.removed_packages.push(package.to_string());
                }
            }
        }
    }

    manifest.save(&manifest_path)?;
    nuxt.save(&nuxt_path)?;
    println!("  ✓ Updated {} and {}", paths::PACKAGE_JSON, paths::NUXT_CONFIG);

    if answers.ui_framework == UiFramework::Tailwind {
        let tailwind =
            tailwind::setup(runner, package_manager, root).context("Tailwind setup failed")?;
        println!("  ✓ Tailwind CSS configured");
        report.tailwind = Some(tailwind);
    }

    Ok(report)
}

fn drop_vuetify(nuxt: &mut NuxtConfig) -> Result<bool> {
    let removed_module = nuxt
        .remove_module(VUETIFY_MODULE)
        .with_context(|| format!("Failed to update modules in {}", paths::NUXT_CONFIG))?;
    nuxt.remove_property(VUETIFY_OPTIONS_KEY)
        .with_context(|| format!("Failed to update {}", paths::NUXT_CONFIG))?;
    Ok(removed_module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{License, OwnerScope};
    use crate::runner::ScriptedRunner;
    use std::fs;
    use tempfile::TempDir;

    const PACKAGE_JSON: &str = r#"{
  "name": "nuxt-starter",
  "private": true,
  "dependencies": {
    "nuxt": "^3.13.0",
    "vuetify": "^3.7.0"
  },
  "devDependencies": {
    "vuetify-nuxt-module": "^0.18.3"
  }
}
"#;

    const NUXT_CONFIG: &str = r#"export default defineNuxtConfig({
  devtools: { enabled: true },
  modules: [
    '@nuxt/eslint',
    'vuetify-nuxt-module',
  ],
  vuetify: {
    vuetifyOptions: {},
  },
})
"#;

    fn template() -> Result<TempDir> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join(paths::PACKAGE_JSON), PACKAGE_JSON)?;
        fs::write(temp.path().join(paths::NUXT_CONFIG), NUXT_CONFIG)?;
        Ok(temp)
    }

    fn answers(ui_framework: UiFramework) -> SetupAnswers {
        SetupAnswers {
            project_name: "demo".to_string(),
            ui_framework,
            public: true,
            license: License::Mit,
            owner: OwnerScope::Personal,
            auto_commit: false,
        }
    }

    fn snapshot(root: &Path) -> Result<(String, String)> {
        Ok((
            fs::read_to_string(root.join(paths::PACKAGE_JSON))?,
            fs::read_to_string(root.join(paths::NUXT_CONFIG))?,
        ))
    }

    #[test]
    fn test_vuetify_presence_follows_choice() -> Result<()> {
        for choice in UiFramework::ALL {
            let temp = template()?;
            rewrite(&ScriptedRunner::new(), "npm", &answers(choice), temp.path())?;

            let manifest = Manifest::load(&temp.path().join(paths::PACKAGE_JSON))?;
            let nuxt = NuxtConfig::load(&temp.path().join(paths::NUXT_CONFIG))?;
            let keep = choice == UiFramework::Vuetify;

            assert_eq!(nuxt.has_module(VUETIFY_MODULE), keep, "{choice}");
            for package in VUETIFY_PACKAGES {
                assert_eq!(manifest.has_dependency(package), keep, "{choice}: {package}");
            }
            assert_eq!(manifest.name(), Some("demo"));
            assert_eq!(manifest.license(), Some("MIT"));
        }
        Ok(())
    }

    #[test]
    fn test_none_adds_nothing() -> Result<()> {
        let temp = template()?;
        let runner = ScriptedRunner::new();
        let report = rewrite(&runner, "npm", &answers(UiFramework::None), temp.path())?;

        assert!(report.removed_module);
        assert_eq!(report.removed_packages, vec!["vuetify", "vuetify-nuxt-module"]);
        assert!(report.tailwind.is_none());
        assert!(runner.calls().is_empty());
        assert!(!temp.path().join(paths::CSS_ENTRY).exists());
        let (_, nuxt) = snapshot(temp.path())?;
        assert!(!nuxt.contains("vuetify"));
        Ok(())
    }

    #[test]
    fn test_rewrite_twice_is_idempotent() -> Result<()> {
        for choice in UiFramework::ALL {
            let temp = template()?;
            rewrite(&ScriptedRunner::new(), "npm", &answers(choice), temp.path())?;
            let first = snapshot(temp.path())?;
            rewrite(&ScriptedRunner::new(), "npm", &answers(choice), temp.path())?;
            assert_eq!(snapshot(temp.path())?, first, "{choice}");
        }
        Ok(())
    }

    #[test]
    fn test_malformed_manifest_leaves_config_untouched() -> Result<()> {
        let temp = template()?;
        fs::write(temp.path().join(paths::PACKAGE_JSON), "{ \"name\": ")?;

        let err = rewrite(&ScriptedRunner::new(), "npm", &answers(UiFramework::None), temp.path())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("package.json"));
        assert_eq!(snapshot(temp.path())?.1, NUXT_CONFIG);
        Ok(())
    }

    #[test]
    fn test_malformed_config_leaves_manifest_untouched() -> Result<()> {
        let temp = template()?;
        fs::write(temp.path().join(paths::NUXT_CONFIG), "export default defineNuxtConfig({")?;

        let err = rewrite(&ScriptedRunner::new(), "npm", &answers(UiFramework::None), temp.path())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("nuxt.config.ts"));
        assert_eq!(snapshot(temp.path())?.0, PACKAGE_JSON);
        Ok(())
    }

    #[test]
    fn test_config_with_import_line_drops_vuetify() -> Result<()> {
        let temp = template()?;
        let nuxt = format!("import {{ defineNuxtConfig }} from 'nuxt/config'\n\n{NUXT_CONFIG}");
        fs::write(temp.path().join(paths::NUXT_CONFIG), nuxt)?;

        rewrite(&ScriptedRunner::new(), "npm", &answers(UiFramework::None), temp.path())?;
        let (_, nuxt) = snapshot(temp.path())?;
        assert!(!nuxt.contains("vuetify"));
        assert!(nuxt.starts_with("import { defineNuxtConfig }"));
        Ok(())
    }

    #[test]
    fn test_unterminated_literal_is_an_error_not_a_crash() -> Result<()> {
        let temp = template()?;
        let broken = "export default defineNuxtConfig({ modules: ['a'] })\n'";
        fs::write(temp.path().join(paths::NUXT_CONFIG), broken)?;

        let runner = ScriptedRunner::new();
        let err = rewrite(&runner, "npm", &answers(UiFramework::Tailwind), temp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("nuxt.config.ts"));
        assert_eq!(snapshot(temp.path())?.0, PACKAGE_JSON);
        Ok(())
    }

    #[test]
    fn test_tailwind_failure_is_labelled() -> Result<()> {
        let temp = template()?;
        let runner = ScriptedRunner::new().fail("npm install -D");

        let err =
            rewrite(&runner, "npm", &answers(UiFramework::Tailwind), temp.path()).unwrap_err();
        assert!(err.to_string().contains("Tailwind setup failed"));
        // the manifest/config rewrite already happened
        let manifest = Manifest::load(&temp.path().join(paths::PACKAGE_JSON))?;
        assert!(!manifest.has_dependency("vuetify"));
        Ok(())
    }
}
