use crate::infra::{InMemoryCrmNotifier, InMemoryLeadRepository};
use clap::Args;
use poolside_ai::error::AppError;
use poolside_ai::workflows::onboarding::leads::{
    ActionPlan, ContactDetails, DecisionMaker, InspirationImage, LeadRepository,
    LeadScoringService, LeadSubmission, LeadTemperature, PropertyData, SalesOpsConfig,
};
use poolside_ai::workflows::webforms::WebformLeadImporter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional webform CSV export replayed into the pipeline first.
    #[arg(long)]
    pub(crate) webform_csv: Option<PathBuf>,
    /// Print the per-category score breakdown for each sample lead.
    #[arg(long)]
    pub(crate) include_breakdown: bool,
    /// Skip the built-in wizard samples and only replay the export.
    #[arg(long)]
    pub(crate) skip_samples: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Tier label to look up (HOT, WARM, COOL, or COLD).
    #[arg(long)]
    pub(crate) label: String,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    if LeadTemperature::from_label(&args.label).is_none() {
        println!(
            "Unknown tier label {:?}; showing the cold-lead playbook",
            args.label
        );
    }
    let plan = ActionPlan::for_label(&args.label);
    println!("{}", plan.title);
    for action in plan.actions {
        println!("  - {}", action);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        webform_csv,
        include_breakdown,
        skip_samples,
    } = args;

    println!("Pool lead scoring demo");
    let repository = Arc::new(InMemoryLeadRepository::default());
    let alerts = Arc::new(InMemoryCrmNotifier::default());
    let service = Arc::new(LeadScoringService::new(
        repository.clone(),
        alerts.clone(),
        SalesOpsConfig::default(),
    ));

    if let Some(path) = webform_csv {
        let import = WebformLeadImporter::from_path(&path)?;
        println!(
            "\nReplaying webform export {} ({} lead(s), {} row(s) skipped)",
            path.display(),
            import.leads.len(),
            import.skipped
        );
        for lead in import.leads {
            let stored = match lead.submitted_at {
                Some(at) => service.submit_backdated(lead.submission, at),
                None => service.submit(lead.submission),
            };
            let stored = match stored {
                Ok(stored) => stored,
                Err(err) => {
                    println!("  Export row rejected: {}", err);
                    continue;
                }
            };
            if let Err(err) = service.score(&stored.lead_id) {
                println!("  Scoring unavailable for {}: {}", stored.lead_id.0, err);
            }
        }
    }

    if !skip_samples {
        println!("\nWizard intake samples");
        for submission in [
            resort_ready_submission(),
            lap_swimmer_submission(),
            weekend_browser_submission(),
        ] {
            let record = match service.submit(submission) {
                Ok(record) => record,
                Err(err) => {
                    println!("  Submission rejected: {}", err);
                    continue;
                }
            };
            let scored = match service.score(&record.lead_id) {
                Ok(scored) => scored,
                Err(err) => {
                    println!("  Scoring unavailable for {}: {}", record.lead_id.0, err);
                    continue;
                }
            };
            if let Some(breakdown) = &scored.score {
                println!(
                    "- {} ({}): {}/100 {} -> {}",
                    scored.submission.contact.name,
                    scored.lead_id.0,
                    breakdown.total_score,
                    breakdown.label(),
                    scored.headline()
                );
                if include_breakdown {
                    for (category, score) in &breakdown.categories {
                        println!("    - {:?}: {} ({})", category, score.points, score.reason);
                    }
                }
            }
        }
    }

    let queue = match service.queue(None) {
        Ok(queue) => queue,
        Err(err) => {
            println!("Call queue unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nCall queue (hottest first)");
    if queue.is_empty() {
        println!("- empty");
    }
    for entry in &queue {
        println!(
            "- {} | {}/100 {} | {}",
            entry.customer, entry.rule_based_score, entry.label, entry.headline
        );
    }

    let snapshot = match service.pipeline_snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            println!("Pipeline snapshot unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nPipeline snapshot");
    println!(
        "- {} lead(s) captured, {} awaiting scoring",
        snapshot.total_leads, snapshot.unscored
    );
    if let Some(average) = snapshot.average_score {
        println!("- average rule-based score {:.1}", average);
    }
    for tier in &snapshot.tiers {
        println!("  - {}: {}", tier.label, tier.count);
    }
    println!("Focus notes:");
    for note in &snapshot.focus_notes {
        println!("  - {}", note);
    }

    if let Some(entry) = queue.first() {
        let stored_view = match repository.fetch(&entry.lead_id) {
            Ok(Some(record)) => record.status_view(),
            Ok(None) => {
                println!("Repository lookup returned no record");
                return Ok(());
            }
            Err(err) => {
                println!("Repository unavailable: {}", err);
                return Ok(());
            }
        };
        match serde_json::to_string_pretty(&stored_view) {
            Ok(json) => println!("\nPublic status payload for {}:\n{}", entry.lead_id.0, json),
            Err(err) => println!("Public status payload unavailable: {}", err),
        }
    }

    let events = alerts.events();
    if events.is_empty() {
        println!("\nCRM alerts: none dispatched");
    } else {
        println!("\nCRM alerts:");
        for alert in events {
            println!("  - template={} -> {}", alert.template, alert.lead_id.0);
        }
    }

    Ok(())
}

fn resort_ready_submission() -> LeadSubmission {
    LeadSubmission {
        contact: ContactDetails {
            name: "Sloane Archer".to_string(),
            email: Some("sloane.archer@example.com".to_string()),
            phone: Some("555-0177".to_string()),
            city: Some("Scottsdale".to_string()),
        },
        budget_range: Some("$200k+".to_string()),
        timeline: Some("ASAP".to_string()),
        pool_vision: Some(
            "Full resort backyard with an infinity edge over the wash, a tanning ledge, \
             a swim-up bar, and a raised spa spilling into the main pool."
                .to_string(),
        ),
        must_haves: Some(vec![
            "Infinity edge".to_string(),
            "Swim-up bar".to_string(),
            "Tanning ledge".to_string(),
            "Raised spa".to_string(),
        ]),
        inspiration_images: Some(vec![InspirationImage {
            url: "https://img.example/infinity-edge.jpg".to_string(),
            caption: Some("Edge detail we keep coming back to".to_string()),
        }]),
        property_data: Some(PropertyData {
            estimated_value: Some("$1M+".to_string()),
            source: Some("county-records".to_string()),
        }),
        decision_makers: Some(vec![
            DecisionMaker {
                name: "Sloane Archer".to_string(),
                relationship: "owner".to_string(),
            },
            DecisionMaker {
                name: "Jesse Archer".to_string(),
                relationship: "spouse".to_string(),
            },
        ]),
        created_by_admin: Some(true),
    }
}

fn lap_swimmer_submission() -> LeadSubmission {
    LeadSubmission {
        contact: ContactDetails {
            name: "Theo Marsh".to_string(),
            email: Some("theo.marsh@example.com".to_string()),
            phone: None,
            city: Some("Mesa".to_string()),
        },
        budget_range: Some("$100k-150k".to_string()),
        timeline: Some("6-12 months".to_string()),
        pool_vision: Some("A heated lap pool along the back fence for morning training.".to_string()),
        property_data: Some(PropertyData {
            estimated_value: Some("$900k".to_string()),
            source: None,
        }),
        decision_makers: Some(vec![DecisionMaker {
            name: "Theo Marsh".to_string(),
            relationship: "owner".to_string(),
        }]),
        ..LeadSubmission::default()
    }
}

fn weekend_browser_submission() -> LeadSubmission {
    LeadSubmission {
        contact: ContactDetails {
            name: "Quinn Baxter".to_string(),
            email: Some("quinn.baxter@example.com".to_string()),
            phone: None,
            city: None,
        },
        ..LeadSubmission::default()
    }
}
