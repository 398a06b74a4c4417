//! Menu-driven terminal flow: search, prune roots, expand, prune domains.

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use domain_discovery::{DomainFinder, WebSearcher};

use crate::render::{print_discovery, print_expansion, root_line};
use crate::session::Session;

#[derive(Debug, Clone, Copy)]
enum Action {
    Search,
    Show,
    Expand,
    DeleteRoot,
    RestoreRoot,
    DeleteDomain,
    RestoreDomain,
    Exit,
}

pub async fn run<S: WebSearcher>(finder: &DomainFinder<S>, company: Option<String>) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();
    let mut session = Session::new();

    print_banner(&term)?;

    if let Some(company) = company {
        search(finder, &mut session, &company).await;
    }

    loop {
        println!();
        let actions = available_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact_on(&term)?;

        match actions[selection].1 {
            Action::Search => {
                let company: String = Input::with_theme(&theme)
                    .with_prompt("Company name")
                    .interact_text_on(&term)?;
                search(finder, &mut session, &company).await;
            }
            Action::Show => show(&session),
            Action::Expand => {
                let roots: Vec<String> = session
                    .visible_roots()
                    .iter()
                    .map(|root| root.label.clone())
                    .collect();
                if let Some(root) = pick(&term, &theme, "Expand which root?", &roots)? {
                    expand(finder, &mut session, &root).await;
                }
            }
            Action::DeleteRoot => {
                let roots: Vec<String> = session
                    .visible_roots()
                    .iter()
                    .map(|root| root.label.clone())
                    .collect();
                if let Some(root) = pick(&term, &theme, "Delete which root?", &roots)? {
                    session.delete_root(&root);
                    println!("{}", format!("Deleted {root}").dimmed());
                }
            }
            Action::RestoreRoot => {
                let deleted: Vec<String> =
                    session.deleted_roots().into_iter().map(String::from).collect();
                if let Some(root) = pick(&term, &theme, "Restore which root?", &deleted)? {
                    session.restore_root(&root);
                }
            }
            Action::DeleteDomain => {
                if let Some((root, domains)) = expanded_root(&term, &theme, &session)? {
                    if let Some(domain) = pick(&term, &theme, "Delete which domain?", &domains)? {
                        session.delete_domain(&root, &domain);
                        println!("{}", format!("Deleted {domain}").dimmed());
                    }
                }
            }
            Action::RestoreDomain => {
                if let Some((root, _)) = expanded_root(&term, &theme, &session)? {
                    let deleted: Vec<String> = session
                        .deleted_domains(&root)
                        .into_iter()
                        .map(String::from)
                        .collect();
                    if let Some(domain) = pick(&term, &theme, "Restore which domain?", &deleted)? {
                        session.restore_domain(&root, &domain);
                    }
                }
            }
            Action::Exit => {
                println!("{}", "Goodbye!".bright_blue());
                break;
            }
        }
    }

    Ok(())
}

fn available_actions(session: &Session) -> Vec<(&'static str, Action)> {
    let mut actions = vec![("Search for root domains", Action::Search)];

    if session.company().is_some() {
        actions.push(("Show results", Action::Show));
    }
    if !session.visible_roots().is_empty() {
        actions.push(("Find all domains for a root", Action::Expand));
        actions.push(("Delete a root", Action::DeleteRoot));
    }
    if !session.deleted_roots().is_empty() {
        actions.push(("Restore a root", Action::RestoreRoot));
    }
    if session
        .visible_roots()
        .iter()
        .any(|root| session.is_expanded(&root.label))
    {
        actions.push(("Delete a domain", Action::DeleteDomain));
        actions.push(("Restore a domain", Action::RestoreDomain));
    }

    actions.push(("Exit", Action::Exit));
    actions
}

async fn search<S: WebSearcher>(finder: &DomainFinder<S>, session: &mut Session, company: &str) {
    println!("{}", format!("Searching for \"{}\"...", company.trim()).dimmed());
    match finder.discover(company).await {
        Ok(report) => {
            print_discovery(&report);
            session.replace_roots(report.company, report.roots);
        }
        Err(e) => println!("{}", format!("Search failed: {e}").red()),
    }
}

async fn expand<S: WebSearcher>(finder: &DomainFinder<S>, session: &mut Session, root: &str) {
    println!("{}", format!("Expanding {root}...").dimmed());
    match finder.expand_report(root).await {
        Ok(report) => {
            print_expansion(&report);
            session.set_expansion(root, report.domains);
        }
        Err(e) => println!("{}", format!("Expansion failed: {e}").red()),
    }
}

fn show(session: &Session) {
    let Some(company) = session.company() else {
        return;
    };

    println!();
    println!("{}", format!("Root domains for \"{company}\"").bright_cyan().bold());
    for root in session.visible_roots() {
        println!("  {}", root_line(root));
        for domain in session.visible_domains(&root.label) {
            println!("      {domain}");
        }
    }
    if !session.deleted_roots().is_empty() {
        println!(
            "{}",
            format!("deleted: {}", session.deleted_roots().join(", ")).dimmed()
        );
    }
}

/// Choose among the expanded, visible roots. Returns the root and its
/// visible domains.
fn expanded_root(
    term: &Term,
    theme: &ColorfulTheme,
    session: &Session,
) -> Result<Option<(String, Vec<String>)>> {
    let roots: Vec<String> = session
        .visible_roots()
        .iter()
        .filter(|root| session.is_expanded(&root.label))
        .map(|root| root.label.clone())
        .collect();

    let Some(root) = pick(term, theme, "Which root?", &roots)? else {
        return Ok(None);
    };
    let domains = session
        .visible_domains(&root)
        .into_iter()
        .map(String::from)
        .collect();
    Ok(Some((root, domains)))
}

/// Select one item, with a trailing "Back" entry. `None` when the list is
/// empty or the user goes back.
fn pick(term: &Term, theme: &ColorfulTheme, prompt: &str, items: &[String]) -> Result<Option<String>> {
    if items.is_empty() {
        println!("{}", "Nothing to choose from.".yellow());
        return Ok(None);
    }

    let mut labels: Vec<&str> = items.iter().map(String::as_str).collect();
    labels.push("Back");

    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_on(term)?;

    Ok(items.get(selection).cloned())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!("{}", "╔════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║          Company Domain Finder         ║".bright_cyan());
    println!("{}", "╚════════════════════════════════════════╝".bright_cyan());
    println!();
    Ok(())
}
