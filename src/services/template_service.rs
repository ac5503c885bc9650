//! Outreach email templates: storage and `{{placeholder}}` rendering.

use std::collections::BTreeMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::info;
use regex::{Captures, Regex};

use crate::errors::ApiError;
use crate::models::{EmailTemplate, RenderedEmail, Task};
use crate::repositories::TemplateRepository;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern");
}

pub const BUILTIN_SUBJECT: &str = "Candidature spontanée - {{positionOrDefault}} - {{companyName}}";

const BUILTIN_ALTERNANCE_BODY: &str = "{{greeting}}

Je me permets de vous contacter car je suis actuellement à la recherche d'une alternance {{fieldPhrase}} {{locationPhrase}}.

Étudiant en Master Informatique, je suis particulièrement intéressé par les activités de {{companyName}} {{websitePhrase}}.

Mon parcours académique m'a permis d'acquérir de solides compétences en programmation, analyse de données et développement web, que je souhaiterais mettre à profit au sein de votre entreprise.

Je serais ravi de pouvoir échanger avec vous concernant les possibilités d'alternance au sein de {{companyName}}. Vous trouverez en pièce jointe mon CV détaillant mon parcours et mes compétences.

Disponible pour un entretien à votre convenance, je reste à votre disposition pour toute information complémentaire.

Je vous remercie par avance pour l'attention que vous porterez à ma candidature et vous prie d'agréer, {{salutation}} l'expression de mes salutations distinguées.";

const BUILTIN_FULL_TIME_BODY: &str = "{{greeting}}

Je me permets de vous contacter suite à ma recherche d'opportunités professionnelles dans le domaine {{domainPhrase}} {{locationPhrase}}.

Je suis particulièrement intéressé par les projets menés par {{companyName}} {{websitePhrase}}.

Je serais ravi de pouvoir mettre mes compétences au service de votre entreprise et de contribuer à vos projets. Vous trouverez en pièce jointe mon CV détaillant mon parcours professionnel.

Disponible pour un entretien à votre convenance, je reste à votre disposition pour toute information complémentaire.

Je vous remercie par avance pour l'attention que vous porterez à ma candidature et vous prie d'agréer, {{salutation}} l'expression de mes salutations distinguées.";

/// Built-in body, picked from the task's position.
pub fn builtin_body(position: &str) -> &'static str {
    if position.to_lowercase().contains("alternance") {
        BUILTIN_ALTERNANCE_BODY
    } else {
        BUILTIN_FULL_TIME_BODY
    }
}

/// Substitute every known `{{name}}`; unknown placeholders are kept verbatim.
pub fn render(template: &str, variables: &BTreeMap<&'static str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholder values derived from a task.
pub fn template_variables(task: &Task) -> BTreeMap<&'static str, String> {
    let contact = task.contact_person.trim();
    let position = task.position.trim();
    let location = task.location.trim();
    let website = task.company_website.trim();

    let mut vars = BTreeMap::new();
    vars.insert("title", task.title.clone());
    vars.insert("description", task.description.clone());
    vars.insert("companyName", task.company_name.clone());
    vars.insert("companyWebsite", website.to_string());
    vars.insert("contactPerson", contact.to_string());
    vars.insert("position", position.to_string());
    vars.insert("location", location.to_string());
    vars.insert(
        "dueDate",
        task.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );

    vars.insert(
        "greeting",
        if contact.is_empty() {
            "Bonjour,".to_string()
        } else {
            format!("Bonjour {},", contact)
        },
    );
    vars.insert(
        "salutation",
        if contact.is_empty() {
            "Madame, Monsieur,".to_string()
        } else {
            String::new()
        },
    );
    vars.insert(
        "positionOrDefault",
        if position.is_empty() {
            "Alternance/Stage".to_string()
        } else {
            position.to_string()
        },
    );
    vars.insert(
        "locationPhrase",
        if location.is_empty() {
            String::new()
        } else {
            format!("à {}", location)
        },
    );
    vars.insert(
        "websitePhrase",
        if website.is_empty() {
            String::new()
        } else {
            format!("que j'ai pu découvrir sur votre site {}", website)
        },
    );
    vars.insert(
        "fieldPhrase",
        if position.contains("Data") {
            "dans le domaine de la data science".to_string()
        } else {
            "en développement informatique".to_string()
        },
    );
    vars.insert(
        "domainPhrase",
        if position.is_empty() {
            "du développement informatique".to_string()
        } else {
            format!("du {}", position)
        },
    );
    vars
}

/// Sample data used by previews when no task is given.
pub fn sample_task() -> Task {
    Task {
        id: "preview".to_string(),
        title: "Candidature TechVision".to_string(),
        company_name: "TechVision".to_string(),
        company_website: "www.techvision.fr".to_string(),
        contact_person: "Mme. Dubois".to_string(),
        position: "Alternance développement web".to_string(),
        location: "Paris".to_string(),
        ..Default::default()
    }
}

/// Render `template` for `task`, falling back to the built-ins for empty parts.
pub fn render_with(template: &EmailTemplate, task: &Task) -> RenderedEmail {
    let vars = template_variables(task);

    let subject = if template.subject.trim().is_empty() {
        BUILTIN_SUBJECT
    } else {
        template.subject.as_str()
    };
    let body = if template.body.trim().is_empty() {
        builtin_body(&task.position)
    } else {
        template.body.as_str()
    };

    RenderedEmail {
        subject: render(subject, &vars).trim().to_string(),
        body: render(body, &vars).trim().to_string(),
    }
}

/// Service for reading, saving, and applying the outreach template.
pub struct TemplateService {
    repository: Arc<TemplateRepository>,
}

impl TemplateService {
    pub fn new(repository: Arc<TemplateRepository>) -> Self {
        Self { repository }
    }

    pub fn get_template(&self) -> EmailTemplate {
        self.repository.load()
    }

    pub fn save_template(&self, template: &EmailTemplate) -> Result<(), ApiError> {
        self.repository.save(template)?;
        info!("Email template saved");
        Ok(())
    }

    /// Render the saved template for a task.
    pub fn render_for_task(&self, task: &Task) -> RenderedEmail {
        render_with(&self.get_template(), task)
    }

    /// Render `template` (or the saved one) against `task` (or the sample data).
    pub fn preview(&self, template: Option<EmailTemplate>, task: Option<Task>) -> RenderedEmail {
        let template = template.unwrap_or_else(|| self.get_template());
        let task = task.unwrap_or_else(sample_task);
        render_with(&template, &task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_known_and_keeps_unknown() {
        let mut vars = BTreeMap::new();
        vars.insert("companyName", "Acme".to_string());

        assert_eq!(
            render("Hello {{companyName}} / {{ companyName }} / {{nope}}", &vars),
            "Hello Acme / Acme / {{nope}}"
        );
    }

    #[test]
    fn test_variables_without_contact() {
        let task = Task {
            company_name: "Acme".to_string(),
            ..Default::default()
        };
        let vars = template_variables(&task);

        assert_eq!(vars["greeting"], "Bonjour,");
        assert_eq!(vars["salutation"], "Madame, Monsieur,");
        assert_eq!(vars["positionOrDefault"], "Alternance/Stage");
        assert_eq!(vars["locationPhrase"], "");
        assert_eq!(vars["websitePhrase"], "");
        assert_eq!(vars["dueDate"], "");
    }

    #[test]
    fn test_builtin_template_selection() {
        let mut task = sample_task();
        let email = render_with(&EmailTemplate::default(), &task);
        assert_eq!(
            email.subject,
            "Candidature spontanée - Alternance développement web - TechVision"
        );
        assert!(email.body.starts_with("Bonjour Mme. Dubois,"));
        assert!(email.body.contains("recherche d'une alternance en développement informatique à Paris"));
        assert!(email.body.contains("que j'ai pu découvrir sur votre site www.techvision.fr"));
        assert!(!email.body.contains("{{"));

        task.position = "Développeur Rust".to_string();
        let email = render_with(&EmailTemplate::default(), &task);
        assert!(email.body.contains("dans le domaine du Développeur Rust à Paris"));
    }

    #[test]
    fn test_custom_template_wins_per_part() {
        let template = EmailTemplate {
            subject: "Application: {{position}} at {{companyName}}".to_string(),
            body: String::new(),
        };
        let email = render_with(&template, &sample_task());
        assert_eq!(
            email.subject,
            "Application: Alternance développement web at TechVision"
        );
        assert!(email.body.starts_with("Bonjour Mme. Dubois,"));
    }

    #[test]
    fn test_service_round_trips_template() {
        let dir = tempfile::tempdir().unwrap();
        let service = TemplateService::new(Arc::new(TemplateRepository::new(
            dir.path().join("templates.json"),
        )));
        assert_eq!(service.get_template(), EmailTemplate::default());

        let template = EmailTemplate {
            subject: "Hi {{companyName}}".to_string(),
            body: "{{greeting}}".to_string(),
        };
        service.save_template(&template).unwrap();
        assert_eq!(service.get_template(), template);

        let email = service.render_for_task(&sample_task());
        assert_eq!(email.subject, "Hi TechVision");
        assert_eq!(email.body, "Bonjour Mme. Dubois,");

        let draft = EmailTemplate {
            subject: "Draft for {{companyName}}".to_string(),
            body: String::new(),
        };
        let task = Task {
            company_name: "Globex".to_string(),
            ..Default::default()
        };
        assert_eq!(
            service.preview(Some(draft), Some(task)).subject,
            "Draft for Globex"
        );
        assert_eq!(service.preview(None, None).subject, "Hi TechVision");
    }
}
