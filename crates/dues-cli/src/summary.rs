use std::io::{self, Write};

use colored::Colorize;
use dues_ledger::LedgerSnapshot;

/// Write a human-readable report of the final ledger.
pub fn write_summary(snapshot: &LedgerSnapshot, out: &mut impl Write) -> io::Result<()> {
    let names: Vec<&str> = snapshot.housemates.iter().map(|h| h.as_str()).collect();
    writeln!(
        out,
        "{} {} ({})",
        "Housemates:".bold(),
        snapshot.housemates.len(),
        names.join(", ")
    )?;

    if snapshot.is_settled() {
        writeln!(out, "{} All dues settled", "✓".green().bold())?;
        return Ok(());
    }

    writeln!(out, "{}", "Simplified dues:".bold())?;
    for transfer in &snapshot.simplified {
        writeln!(
            out,
            "  {} → {}  {}",
            transfer.debtor.as_str().yellow(),
            transfer.creditor.as_str().green(),
            transfer.amount.to_string().bold()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dues_ledger::{HousemateId, Transfer};

    fn id(name: &str) -> HousemateId {
        HousemateId::new(name).unwrap()
    }

    fn render(snapshot: &LedgerSnapshot) -> String {
        let mut out = Vec::new();
        write_summary(snapshot, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn settled_household() {
        let text = render(&LedgerSnapshot {
            housemates: vec![id("ANDY"), id("BO")],
            ..Default::default()
        });
        assert!(text.contains("ANDY, BO"));
        assert!(text.contains("All dues settled"));
    }

    #[test]
    fn lists_outstanding_transfers() {
        let text = render(&LedgerSnapshot {
            housemates: vec![id("ANDY"), id("BO"), id("WOODY")],
            raw: vec![],
            simplified: vec![
                Transfer::new(id("BO"), id("ANDY"), 1150),
                Transfer::new(id("WOODY"), id("ANDY"), 850),
            ],
        });
        assert!(text.contains("Simplified dues"));
        assert!(text.contains("1150"));
        assert!(text.contains("WOODY"));
        assert!(!text.contains("All dues settled"));
    }
}
