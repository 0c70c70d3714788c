use filiera::graph::seed;
use filiera::query::{Hop, Plan, PlanExecutor, PropertyFilter};
use filiera::validation::{
    ApprovalWorkflow, ReviewDecision, RuleBasedAssessor, WorkflowOutcome,
};
use filiera::{EdgeKind, Label, RecordId};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filiera=info".into()),
        )
        .init();

    println!("Filiera Supply Chain Provenance v{}", filiera::version());
    println!("==========================================");
    println!();

    let store = Arc::new(seed::supply_chain());
    println!("Graph statistics:");
    println!("  Total records: {}", store.record_count());
    println!("  Total relationships: {}", store.edge_count());

    demo_plan_execution(&store);
    demo_approval_workflow(store).await?;

    Ok(())
}

fn demo_plan_execution(store: &filiera::RecordStore) {
    println!("\n=== Demo 1: Plan Execution ===");
    println!("Plan: Supplier{{location contains \"Florence\"}} -[PROVIDES]->");

    let plan = Plan::scan(Label::Supplier)
        .with_filter(PropertyFilter::contains("location", "Florence"))
        .with_hop(Hop::outgoing(EdgeKind::Provides));

    match PlanExecutor::new(store).execute(&plan) {
        Ok(materials) => {
            for material in &materials {
                println!(
                    "  -> {} ({})",
                    material.display_name(),
                    material.property_str("type").unwrap_or("?")
                );
            }
            println!("  {} material(s) found", materials.len());
        }
        Err(e) => eprintln!("  plan execution failed: {}", e),
    }
}

async fn demo_approval_workflow(
    store: Arc<filiera::RecordStore>,
) -> anyhow::Result<()> {
    println!("\n=== Demo 2: Certification Approval Workflow ===");
    let mut workflow = ApprovalWorkflow::new(store, RuleBasedAssessor::new());

    for id in ["CERT005", "CERT004"] {
        let id = RecordId::new(id);
        println!("\nValidating {}...", id);
        match workflow.begin(&id).await? {
            WorkflowOutcome::Finalized(report) => {
                println!(
                    "  {} -> {} (tier {})",
                    report.certification_name,
                    report.status,
                    report.tier.map(|t| t.to_string()).unwrap_or_default()
                );
            }
            WorkflowOutcome::PendingReview(state) => {
                println!("  HUMAN REVIEW REQUIRED");
                println!("  Assessment: {}", state.assessment);

                // Stand-in for the out-of-band reviewer
                let outcome = workflow
                    .resume(
                        &id,
                        ReviewDecision::Reject {
                            notes: Some("Permit lapsed; renewal documents required".to_string()),
                        },
                    )
                    .await?;
                if let WorkflowOutcome::Finalized(report) = outcome {
                    println!(
                        "  {} -> {} after review",
                        report.certification_name, report.status
                    );
                    for entry in &report.audit {
                        println!("    [{}] {}", entry.state, entry.detail);
                    }
                }
            }
        }
    }

    let summary = workflow.summary();
    println!(
        "\nSummary: {} validated, {} auto-approved, {} approved, {} rejected",
        summary.total, summary.auto_approved, summary.approved, summary.rejected
    );
    Ok(())
}
