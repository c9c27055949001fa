use anyhow::Result;
use deskapps_core::{Config, Contact, ContactDraft, ContactStore, Palette, StoreResult, db};

use crate::{
    cli::{ContactFields, ContactsCommand},
    render,
};

pub fn run(cmd: ContactsCommand, config: &Config, palette: &Palette) -> Result<()> {
    check_input(&cmd)?;
    let store = ContactStore::new(db::open(&config.database_path()?)?);

    match cmd {
        ContactsCommand::List { search } => {
            let term = search.unwrap_or_default();
            let contacts = store.list(&term)?;
            print!("{}", render::contact_list(&contacts, !term.trim().is_empty(), palette));
        }
        ContactsCommand::Add(fields) => {
            let draft = new_draft(fields);
            let contact = store.add(&draft)?;
            print!("{}", render::dialog("Contact Added", &format!("Saved {} (#{})", contact.name, contact.id), palette));
            print!("{}", render::contact_list(&store.list("")?, false, palette));
        }
        ContactsCommand::Edit { id, fields } => {
            let existing = store.get(id)?;
            let contact = store.update(id, &merge(existing, fields))?;
            print!("{}", render::dialog("Contact Updated", &format!("Saved {} (#{})", contact.name, contact.id), palette));
        }
        ContactsCommand::Delete { id, yes } => {
            let contact = store.get(id)?;
            let confirmed = yes
                || inquire::Confirm::new(&format!("Are you sure you want to delete {}?", contact.name))
                    .with_default(false)
                    .prompt()?;

            if confirmed {
                store.delete(id)?;
                print!("{}", render::dialog("Contact Deleted", &format!("Deleted {}", contact.name), palette));
            }
        }
    }

    Ok(())
}

fn new_draft(fields: ContactFields) -> ContactDraft {
    ContactDraft { name: fields.name.unwrap_or_default(), phone: fields.phone, email: fields.email }
}

/// Name validation that runs before the database is opened.
fn check_input(cmd: &ContactsCommand) -> StoreResult<()> {
    match cmd {
        ContactsCommand::Add(fields) => ContactDraft::new(fields.name.clone().unwrap_or_default()).validate(),
        ContactsCommand::Edit { fields: ContactFields { name: Some(name), .. }, .. } => {
            ContactDraft::new(name.clone()).validate()
        }
        _ => Ok(()),
    }
}

/// Edit form prefilled with the stored values; given flags overwrite them.
fn merge(existing: Contact, fields: ContactFields) -> ContactDraft {
    ContactDraft {
        name: fields.name.unwrap_or(existing.name),
        phone: fields.phone.or(existing.phone),
        email: fields.email.or(existing.email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Contact {
        Contact { id: 7, name: "Ada".into(), phone: Some("555".into()), email: None }
    }

    fn fields(name: Option<&str>) -> ContactFields {
        ContactFields { name: name.map(str::to_string), phone: Some("555".into()), email: None }
    }

    #[test]
    fn blank_name_is_rejected_before_opening_the_database() {
        // The database path points at a location that cannot be created.
        let mut config = Config::default();
        config.database.path = Some("/dev/null/deskapps.sqlite".into());
        let palette = deskapps_core::Theme::Light.palette();

        let err = run(ContactsCommand::Add(fields(Some("   "))), &config, palette).unwrap_err();
        assert_eq!(err.to_string(), "name: Name cannot be empty");

        let edit = ContactsCommand::Edit { id: 1, fields: fields(Some("")) };
        let err = run(edit, &config, palette).unwrap_err();
        assert_eq!(err.to_string(), "name: Name cannot be empty");
    }

    #[test]
    fn check_input_allows_edits_without_a_name() {
        assert!(check_input(&ContactsCommand::Edit { id: 1, fields: fields(None) }).is_ok());
        assert!(check_input(&ContactsCommand::Add(fields(None))).is_err());
        assert!(check_input(&ContactsCommand::Add(fields(Some("Ada")))).is_ok());
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let draft = merge(stored(), ContactFields { name: None, phone: None, email: Some("a@b.c".into()) });

        assert_eq!(draft, ContactDraft::new("Ada").phone("555").email("a@b.c"));
    }

    #[test]
    fn empty_flag_clears_field_on_save() {
        let store = ContactStore::new(db::open_in_memory().unwrap());
        let contact = store.add(&ContactDraft::new("Ada").phone("555")).unwrap();

        let draft = merge(contact.clone(), ContactFields { name: None, phone: Some(String::new()), email: None });
        let updated = store.update(contact.id, &draft).unwrap();

        assert_eq!(updated.phone, None);
    }
}
