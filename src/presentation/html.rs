// HTML pages for the form flow
use crate::domain::model::TranslationResponse;
use maud::{html, Markup, DOCTYPE};

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                link rel="stylesheet" href="/static/style.css";
            }
            body { (body) }
        }
    }
    .into_string()
}

pub fn render_home<'a, I>(models: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    page(
        "Translator",
        html! {
            h1 { "Translator" }
            form method="post" action="/translate" {
                textarea name="text" rows="8" cols="60" required {}
                select name="model" {
                    @for model in models {
                        option value=(model) { (model) }
                    }
                }
                button type="submit" { "Translate" }
            }
        },
    )
}

pub fn render_result(response: &TranslationResponse) -> String {
    page(
        "Translation",
        html! {
            h1 { "Translation" }
            p.model { "Model: " (response.model) }
            h2 { "Original" }
            pre.original { (response.original) }
            h2 { "Translated" }
            pre.translated { (response.translated) }
            a href="/" { "Translate another" }
        },
    )
}

pub fn render_error(message: &str) -> String {
    page(
        "Translation failed",
        html! {
            h1 { "Translation failed" }
            p.error { (message) }
            a href="/" { "Back" }
        },
    )
}
