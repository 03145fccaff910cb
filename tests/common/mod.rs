//! Shared fixtures for wizard scenario tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use kickoff::answers::{License, OwnerScope, SetupAnswers, UiFramework};
use kickoff::runner::{CommandOutput, Invocation, ScriptedRunner};

pub const PACKAGE_JSON: &str = r#"{
  "name": "nuxt-starter",
  "private": true,
  "scripts": {
    "dev": "nuxt dev"
  },
  "dependencies": {
    "nuxt": "^3.13.0",
    "vuetify": "^3.7.0"
  },
  "devDependencies": {
    "vuetify-nuxt-module": "^0.18.3"
  }
}
"#;

pub const NUXT_CONFIG: &str = r#"// https://nuxt.com/docs/api/configuration/nuxt-config
export default defineNuxtConfig({
  compatibilityDate: '2024-11-01',
  devtools: { enabled: true },
  modules: ['@nuxt/eslint', 'vuetify-nuxt-module'],
  vuetify: {
    moduleOptions: {},
    vuetifyOptions: './vuetify.config.ts',
  },
})
"#;

pub const TAILWIND_CONFIG: &str = r#"/** @type {import('tailwindcss').Config} */
export default {
  content: ['./components/**/*.vue', './app.vue'],
  // keep vuetify components out of purge
  safelist: [/^v-/], // vuetify
  theme: {
    extend: {},
  },
}
"#;

pub const APP_VUE: &str = "<template>\n  <NuxtPage />\n</template>\n";

/// Every file a complete template ships.
pub const TEMPLATE_FILES: [(&str, &str); 4] = [
    ("package.json", PACKAGE_JSON),
    ("nuxt.config.ts", NUXT_CONFIG),
    ("tailwind.config.js", TAILWIND_CONFIG),
    ("app.vue", APP_VUE),
];

/// Behaves like `gh repo clone <repo> <target>`: writes `files` plus a `.git` dir.
pub fn clone_writes(
    files: &'static [(&'static str, &'static str)],
) -> impl Fn(&Invocation) -> CommandOutput {
    move |call| {
        let root = call.cwd.join(&call.args[3]);
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        for (name, contents) in files {
            fs::write(root.join(name), contents).unwrap();
        }
        CommandOutput::ok("")
    }
}

/// A healthy machine with a reachable, complete template.
pub fn healthy_runner() -> ScriptedRunner {
    ScriptedRunner::new()
        .reply("node --version", CommandOutput::ok("v20.11.1\n"))
        .on("gh repo clone", clone_writes(&TEMPLATE_FILES))
}

/// Every probed tool is on `PATH`.
pub fn all_tools(tool: &str) -> Option<PathBuf> {
    Some(PathBuf::from("/usr/bin").join(tool))
}

pub fn no_tools(_tool: &str) -> Option<PathBuf> {
    None
}

pub fn answers(name: &str, ui_framework: UiFramework) -> SetupAnswers {
    SetupAnswers {
        project_name: name.to_string(),
        ui_framework,
        public: true,
        license: License::Mit,
        owner: OwnerScope::Personal,
        auto_commit: true,
    }
}
