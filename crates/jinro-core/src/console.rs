//! Line-oriented commands over a [`SessionLedger`].

use crate::error::{GmError, GmResult};
use crate::ledger::SessionLedger;

impl SessionLedger {
    /// Process a line of moderator input and return a response.
    pub fn process(&mut self, input: &str) -> GmResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "count" => self.do_count(rest),
            "preset" => self.do_preset(rest),
            "roles" => Ok(self.render_roles()),
            "role" => self.do_role(rest),
            "names" => self.do_names(rest),
            "rename" => self.do_rename(rest),
            "order" => {
                self.assign_speaking_order();
                Ok(self.export_speaking_order_text())
            }
            "deal" => {
                self.assign_roles()?;
                Ok(format!("Roles dealt to {} participants.", self.roster().len()))
            }
            "omen" => Ok(format!("Prophecy: {}", self.draw_prophecy()?)),
            "table" => Ok(self.render_table()),
            "export" => self.do_export(rest),
            "status" => Ok(self.render_status()),
            "reset" => {
                self.reset_all();
                Ok("Session reset.".to_string())
            }
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(GmError::InvalidCommand(format!(
                "unknown command '{other}', type 'help'"
            ))),
        }
    }

    fn do_count(&mut self, rest: &str) -> GmResult<String> {
        let count = parse_number(rest, "usage: count <9-11>")?;
        self.set_participant_count(count)?;
        Ok(format!("Participants: {}", self.participant_count()))
    }

    fn do_preset(&mut self, rest: &str) -> GmResult<String> {
        let count = if rest.is_empty() {
            self.participant_count().get()
        } else {
            parse_number(rest, "usage: preset [9-11]")?
        };
        self.load_role_preset(count)?;
        Ok(self.render_roles())
    }

    fn do_role(&mut self, rest: &str) -> GmResult<String> {
        const USAGE: &str = "usage: role <number> <name> [excluded|eligible]";

        let mut words: Vec<&str> = rest.split_whitespace().collect();
        if words.len() < 2 {
            return Err(GmError::InvalidCommand(USAGE.to_string()));
        }
        let number = parse_number(words.remove(0), USAGE)?;
        let current = self
            .catalog()
            .slot(number)
            .ok_or(GmError::SlotOutOfRange(number))?
            .prophecy_excluded;

        let excluded = match words.last().map(|w| w.to_lowercase()).as_deref() {
            Some("excluded") if words.len() > 1 => {
                words.pop();
                true
            }
            Some("eligible") if words.len() > 1 => {
                words.pop();
                false
            }
            _ => current,
        };
        let name = words.join(" ");

        self.edit_role_slot(number, &name, excluded)?;
        Ok(self
            .catalog()
            .slot(number)
            .map(|s| s.to_string())
            .unwrap_or_default())
    }

    fn do_names(&mut self, rest: &str) -> GmResult<String> {
        if rest.is_empty() {
            return Err(GmError::InvalidCommand(
                "usage: names <name>,<name>,...".to_string(),
            ));
        }
        self.set_bulk_names(rest);
        let renamed = self.apply_bulk_names();
        Ok(format!("Renamed {renamed} participant(s)."))
    }

    fn do_rename(&mut self, rest: &str) -> GmResult<String> {
        const USAGE: &str = "usage: rename <seat> <name>";

        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        let seat = parse_number(parts[0], USAGE)?;
        let name = parts.get(1).map(|s| s.trim()).unwrap_or("");
        let id = self
            .roster()
            .by_seat(seat)
            .map(|p| p.id)
            .ok_or_else(|| GmError::InvalidCommand(format!("no participant in seat {seat}")))?;

        self.set_participant_name(id, name)?;
        let shown = self
            .roster()
            .get(id)
            .map(|p| p.display_name())
            .unwrap_or_default();
        Ok(format!("Seat {seat}: {shown}"))
    }

    fn do_export(&self, rest: &str) -> GmResult<String> {
        match rest.to_lowercase().as_str() {
            "order" | "" => Ok(self.export_speaking_order_text()),
            "roles" => Ok(self.export_role_text()),
            "journal" => Ok(self.export_journal_text()),
            other => Err(GmError::InvalidCommand(format!(
                "unknown export '{other}', use: order, roles, journal"
            ))),
        }
    }

    fn render_roles(&self) -> String {
        if self.catalog().is_empty() {
            return "No role table loaded. Use 'preset'.".to_string();
        }
        self.catalog()
            .slots()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_table(&self) -> String {
        let mut out = String::from("Order | Name | Role | Draw A | Draw B");
        for row in self.current_table() {
            out.push_str(&format!(
                "\n{} | {} | {} | {} | {}",
                row.order.map(|o| o.to_string()).unwrap_or_else(|| "--".to_string()),
                row.name,
                row.role.as_deref().unwrap_or("-"),
                row.draw_a.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                row.draw_b.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            ));
        }
        out
    }

    fn render_status(&self) -> String {
        let mut out = format!("Participants: {}\n", self.participant_count());
        out.push_str(&format!("State: {}\n", self.state()));
        if self.catalog().is_empty() {
            out.push_str("Role table: not loaded\n");
        } else {
            out.push_str(&format!("Role table: {} roles\n", self.catalog().len()));
        }
        out.push_str(&format!("Prophecy: {}", self.omen().unwrap_or("-")));
        out
    }
}

fn parse_number(text: &str, usage: &str) -> GmResult<usize> {
    text.trim()
        .parse()
        .map_err(|_| GmError::InvalidCommand(usage.to_string()))
}

const HELP: &str = "\
Moderator Commands:
  count <9-11>                       Set the number of participants
  preset [9-11]                      Load a role table (discards edits)
  roles                              Show the role table
  role <n> <name> [excluded|eligible] Edit role slot n
  names <a>,<b>,...                  Name participants in seating order
  rename <seat> <name>               Rename one participant
  order                              Draw a fresh speaking order
  deal                               Deal roles (speaking order unchanged)
  omen                               Draw a prophecy target
  table                              Show the session table
  export [order|roles|journal]       Print export text
  status                             Show session status
  reset                              Clear everything
  quit                               Exit";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerState;

    fn session() -> SessionLedger {
        let mut s = SessionLedger::default();
        s.process("names A,B,C,D,E,F,G,H,I").unwrap();
        s
    }

    #[test]
    fn empty_input() {
        let mut s = session();
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn unknown_command() {
        let mut s = session();
        assert!(matches!(
            s.process("dance"),
            Err(GmError::InvalidCommand(_))
        ));
    }

    #[test]
    fn full_deal() {
        let mut s = session();
        let roles = s.process("preset").unwrap();
        assert!(roles.contains("人狼A"));

        let order = s.process("order").unwrap();
        assert_eq!(order.lines().count(), 9);
        assert_eq!(s.state(), LedgerState::OrderAssigned);

        let dealt = s.process("deal").unwrap();
        assert_eq!(dealt, "Roles dealt to 9 participants.");
        assert_eq!(s.process("export").unwrap(), order);

        let exported = s.process("export roles").unwrap();
        assert!(exported.lines().all(|l| !l.ends_with('-')));

        let omen = s.process("omen").unwrap();
        assert!(omen.starts_with("Prophecy: "));
    }

    #[test]
    fn count_changes() {
        let mut s = session();
        assert_eq!(s.process("count 11").unwrap(), "Participants: 11");
        assert!(matches!(
            s.process("count 13"),
            Err(GmError::Configuration(_))
        ));
        assert!(matches!(
            s.process("count many"),
            Err(GmError::InvalidCommand(_))
        ));
    }

    #[test]
    fn role_edit_flags() {
        let mut s = session();
        s.process("preset").unwrap();
        assert_eq!(s.process("role 3 狐 excluded").unwrap(), "3. 狐 [madman] excluded");
        assert_eq!(s.process("role 3 狂人").unwrap(), "3. 狂人 [madman] excluded");
        assert_eq!(s.process("role 1 人狼A eligible").unwrap(), "1. 人狼A [werewolf] eligible");
        assert!(matches!(
            s.process("role 20 x"),
            Err(GmError::SlotOutOfRange(20))
        ));
        assert!(matches!(s.process("role 2"), Err(GmError::InvalidCommand(_))));
    }

    #[test]
    fn rename_seat() {
        let mut s = session();
        assert_eq!(s.process("rename 2 Bea").unwrap(), "Seat 2: Bea");
        assert_eq!(s.process("rename 2").unwrap(), "Seat 2: Player 2");
        assert!(matches!(
            s.process("rename 12 Nobody"),
            Err(GmError::InvalidCommand(_))
        ));
    }

    #[test]
    fn deal_errors_surface() {
        let mut s = session();
        assert_eq!(s.process("deal"), Err(GmError::NoSpeakingOrder));
        assert_eq!(s.process("omen"), Err(GmError::EmptyCandidates));
    }

    #[test]
    fn table_and_status() {
        let mut s = session();
        let table = s.process("table").unwrap();
        assert!(table.starts_with("Order | Name"));
        assert!(table.contains("-- | A | - | - | -"));

        s.process("preset 9").unwrap();
        let status = s.process("status").unwrap();
        assert!(status.contains("Participants: 9"));
        assert!(status.contains("State: roster ready"));
        assert!(status.contains("Role table: 9 roles"));
    }

    #[test]
    fn export_journal() {
        let mut s = session();
        s.process("order").unwrap();
        let journal = s.process("export journal").unwrap();
        assert!(journal.contains("Speaking order drawn for 9"));
        assert!(matches!(
            s.process("export pdf"),
            Err(GmError::InvalidCommand(_))
        ));
    }

    #[test]
    fn reset_and_quit() {
        let mut s = session();
        s.process("preset").unwrap();
        assert_eq!(s.process("reset").unwrap(), "Session reset.");
        assert!(s.catalog().is_empty());
        assert_eq!(s.process("quit").unwrap(), "Goodbye!");
    }

    #[test]
    fn help_lists_commands() {
        let mut s = session();
        let help = s.process("help").unwrap();
        assert!(help.contains("Moderator Commands"));
        assert!(help.contains("omen"));
    }
}
