use tracing::info;

use crate::db::Storage;
use crate::error::PortagenError;
use crate::types::TemplateFiles;
use crate::types::forms::TemplateForm;

const STARTER_HTML: &str = r#"<header>
  <h1>{{personalInfo.fullName}}</h1>
  <h2>{{personalInfo.title}}</h2>
  <p>{{personalInfo.about}}</p>
</header>
{{#if experience}}
<section class="experience">
  <h3>Experience</h3>
  {{#each experience}}
  <article>
    <h4>{{role}} at {{company}}</h4>
    <span>{{startDate}} - {{endDate}}</span>
    <p>{{description}}</p>
  </article>
  {{/each}}
</section>
{{/if}}
{{#if education}}
<section class="education">
  <h3>Education</h3>
  {{#each education}}
  <p>{{degree}}, {{institution}} ({{startYear}} - {{endYear}})</p>
  {{/each}}
</section>
{{/if}}
{{#if projects}}
<section class="projects">
  <h3>Projects</h3>
  {{#each projects}}
  <article>
    <h4>{{add @index 1}}. {{name}}</h4>
    <p>{{description}}</p>
    {{#if link}}<a href="{{link}}">{{link}}</a>{{/if}}
  </article>
  {{/each}}
</section>
{{/if}}
{{#if skills}}
<ul class="skills">
  {{#each skills}}<li>{{this}}</li>{{/each}}
</ul>
{{/if}}
<footer>
  {{#with personalInfo.contact}}
  {{#if email}}<a href="mailto:{{email}}">{{email}}</a>{{/if}}
  {{#if github}}<a href="{{github}}">GitHub</a>{{/if}}
  {{#if linkedin}}<a href="{{linkedin}}">LinkedIn</a>{{/if}}
  {{/with}}
</footer>
"#;

const STARTER_CSS: &str = r#"body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; color: #222; }
h1 { margin-bottom: 0; }
h2 { margin-top: 0.25rem; color: #555; font-weight: 400; }
section { margin-top: 2rem; }
.skills { display: flex; flex-wrap: wrap; gap: 0.5rem; list-style: none; padding: 0; }
.skills li { background: #eef; border-radius: 4px; padding: 0.2rem 0.6rem; }
"#;

const NEON_CSS: &str = r#"body { font-family: "Courier New", monospace; background: #0a0a12; color: #e0e0ff; max-width: 52rem; margin: 2rem auto; }
h1 { color: #ff2bd6; text-shadow: 0 0 8px #ff2bd6; margin-bottom: 0; }
h2, h3 { color: #00f0ff; font-weight: 400; }
section { margin-top: 2rem; border-left: 2px solid #00f0ff; padding-left: 1rem; }
a { color: #f5ff00; }
.skills { display: flex; flex-wrap: wrap; gap: 0.5rem; list-style: none; padding: 0; }
.skills li { border: 1px solid #ff2bd6; padding: 0.2rem 0.6rem; }
"#;

struct BuiltIn {
    name: &'static str,
    description: &'static str,
    preview_url: &'static str,
    is_premium: bool,
    css: &'static str,
}

const BUILT_INS: [BuiltIn; 2] = [
    BuiltIn {
        name: "Starter",
        description: "A clean single-page portfolio.",
        preview_url: "https://picsum.photos/seed/starter/400/300.jpg",
        is_premium: false,
        css: STARTER_CSS,
    },
    BuiltIn {
        name: "Cyberpunk Neon",
        description: "Dark layout with neon accents.",
        preview_url: "https://picsum.photos/seed/cyberpunk/400/300.jpg",
        is_premium: true,
        css: NEON_CSS,
    },
];

/// Fill an empty catalogue with the built-in templates, one free and one premium.
///
/// Returns whether anything was inserted.
pub async fn seed_templates(storage: &Storage) -> Result<bool, PortagenError> {
    if storage.count_templates().await? > 0 {
        return Ok(false);
    }

    for built_in in BUILT_INS {
        let template = storage
            .insert_template(TemplateForm {
                name: built_in.name.to_string(),
                description: built_in.description.to_string(),
                preview_url: built_in.preview_url.to_string(),
                is_premium: built_in.is_premium,
                files: TemplateFiles {
                    html: STARTER_HTML.to_string(),
                    css: built_in.css.to_string(),
                    js: String::new(),
                },
            })
            .await?;
        info!(
            template_id = %template.id,
            name = %template.name,
            is_premium = template.is_premium,
            "seeded built-in template"
        );
    }
    Ok(true)
}
