use chrono::{Duration, NaiveDate};
use ojos_chat::domain::campaign::NewCampaign;
use ojos_chat::domain::contact::NewContact;
use ojos_chat::domain::contact_list::{
    ContactList, NewContactList, NewContactListItem, UpdateContactListItem,
};
use ojos_chat::domain::flow::{NewFlow, UpdateFlow};
use ojos_chat::domain::quick_message::NewQuickMessage;
use ojos_chat::domain::schedule::NewSchedule;
use ojos_chat::domain::tag::{NewTag, Tag};
use ojos_chat::domain::ticket::{NewTicket, UpdateTicket};
use ojos_chat::domain::types::{
    CampaignName, CampaignStatus, CompanyId, ContactChannel, ContactListName, ContactName,
    FlowName, HexColor, MessageBody, PhoneNumber, ResetToken, Shortcode, TagName, TicketStatus,
    UserEmail,
};
use ojos_chat::repository::errors::RepositoryError;
use ojos_chat::repository::{
    CampaignReader, CampaignWriter, CompanyListQuery, CompanyReader, CompanyWriter,
    ContactListItemQuery, ContactListQuery, ContactListReader, ContactListWriter,
    ContactListsQuery, ContactReader, ContactWriter, DieselRepository, FlowListQuery, FlowReader,
    FlowWriter, QuickMessageListQuery,
    QuickMessageReader, QuickMessageWriter, ScheduleListQuery, ScheduleReader, ScheduleWriter,
    SettingReader, SettingWriter, TagListQuery, TagReader, TagWriter, TicketListQuery,
    TicketReader, TicketWriter, UserListQuery, UserReader, UserWriter,
};

mod common;

fn at(hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn tag(repo: &DieselRepository, company_id: CompanyId, name: &str, kanban: bool) -> Tag {
    repo.create_tag(&NewTag {
        company_id,
        name: TagName::new(name).unwrap(),
        color: HexColor::new("#00AAFF").unwrap(),
        kanban,
    })
    .unwrap()
}

fn contact(company_id: CompanyId, name: &str, number: &str) -> NewContact {
    NewContact {
        company_id,
        name: ContactName::new(name).unwrap(),
        number: PhoneNumber::new(number).unwrap(),
        email: None,
        is_group: false,
        channel: ContactChannel::Whatsapp,
    }
}

#[test]
fn test_company_with_admin_and_cascade_delete() {
    let test_db = common::TestDb::new("test_company_with_admin_and_cascade_delete.db");
    let repo = test_db.repo();

    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    assert_eq!(admin.company_id, acme.id);
    assert_eq!(acme.due_date, NaiveDate::from_ymd_opt(2024, 5, 4));

    let (total, companies) = repo
        .list_companies(CompanyListQuery::new().search("acme"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(companies[0].id, acme.id);

    let member = common::seed_user(&repo, &acme, "Bea", "bea@acme.com");
    let lane = tag(&repo, acme.id, "Novo", true);

    repo.delete_company(acme.id).unwrap();

    assert!(repo.get_company_by_id(acme.id).unwrap().is_none());
    assert!(repo.get_user(admin.id).unwrap().is_none());
    assert!(repo.get_user(member.id).unwrap().is_none());
    assert!(repo.get_tag_by_id(lane.id, acme.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_company(acme.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_user_listing_is_company_scoped_and_paginated() {
    let test_db = common::TestDb::new("test_user_listing_is_company_scoped_and_paginated.db");
    let repo = test_db.repo();

    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let (other, _) = common::seed_company(&repo, "Other", "admin@other.com");
    for i in 0..25 {
        common::seed_user(&repo, &acme, &format!("Agent {i:02}"), &format!("agent{i}@acme.com"));
    }
    common::seed_user(&repo, &other, "Agent X", "x@other.com");

    let (total, first) = repo
        .list_users(UserListQuery::new(acme.id).search("agent").paginate(1, 20))
        .unwrap();
    assert_eq!(total, 25);
    assert_eq!(first.len(), 20);
    assert_eq!(first[0].name.as_str(), "Agent 00");

    let (_, second) = repo
        .list_users(UserListQuery::new(acme.id).search("agent").paginate(2, 20))
        .unwrap();
    assert_eq!(second.len(), 5);

    assert_eq!(repo.list_company_users(other.id).unwrap().len(), 2);
}

#[test]
fn test_duplicate_email_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_email_is_rejected.db");
    let repo = test_db.repo();

    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let result = repo.create_user(&common::new_user(
        &acme,
        "Again",
        "admin@acme.com",
        ojos_chat::domain::types::Profile::User,
    ));
    assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
}

#[test]
fn test_page_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_page_far_past_the_end_is_empty.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");

    let (total, users) = repo
        .list_users(UserListQuery::new(acme.id).paginate(usize::MAX, 20))
        .unwrap();
    assert_eq!(total, 1);
    assert!(users.is_empty());
}

#[test]
fn test_tickets_width_touches_updated_at() {
    let test_db = common::TestDb::new("test_tickets_width_touches_updated_at.db");
    let repo = test_db.repo();
    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");

    let updated = repo.update_tickets_width(admin.id, 720).unwrap();

    assert_eq!(updated.preferences.default_tickets_manager_width, 720);
    assert!(updated.updated_at > admin.updated_at);
}

#[test]
fn test_reset_token_expires_strictly() {
    let test_db = common::TestDb::new("test_reset_token_expires_strictly.db");
    let repo = test_db.repo();

    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let token = ResetToken::new();
    repo.set_reset_token(admin.id, &token, at(12)).unwrap();

    let found = repo.get_user_by_reset_token(&token, at(11)).unwrap();
    assert_eq!(found.map(|u| u.id), Some(admin.id));
    assert!(repo.get_user_by_reset_token(&token, at(12)).unwrap().is_none());
    assert!(
        repo.get_user_by_reset_token(&ResetToken::new(), at(11))
            .unwrap()
            .is_none()
    );

    repo.set_user_password(admin.id, "new-hash").unwrap();
    assert!(repo.get_user_by_reset_token(&token, at(11)).unwrap().is_none());

    let credentials = repo
        .get_user_credentials(&UserEmail::new("ADMIN@acme.com").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(credentials.password_hash, "new-hash");
}

#[test]
fn test_settings_upsert() {
    let test_db = common::TestDb::new("test_settings_upsert.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");

    repo.upsert_setting(acme.id, "signature", "on").unwrap();
    let updated = repo.upsert_setting(acme.id, "signature", "off").unwrap();
    assert_eq!(updated.value, "off");
    assert_eq!(repo.list_settings(acme.id).unwrap().len(), 1);

    let values = vec![
        ("messageInterval".to_string(), "20".to_string()),
        ("variables".to_string(), "[]".to_string()),
    ];
    repo.upsert_campaign_settings(acme.id, &values).unwrap();
    let values = vec![("messageInterval".to_string(), "30".to_string())];
    let stored = repo.upsert_campaign_settings(acme.id, &values).unwrap();
    assert_eq!(stored.len(), 2);
    let interval = stored.iter().find(|s| s.key == "messageInterval").unwrap();
    assert_eq!(interval.value, "30");
    assert_eq!(repo.list_campaign_settings(acme.id).unwrap().len(), 2);
}

#[test]
fn test_tag_names_are_unique_per_company() {
    let test_db = common::TestDb::new("test_tag_names_are_unique_per_company.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let (other, _) = common::seed_company(&repo, "Other", "admin@other.com");

    tag(&repo, acme.id, "Lead", true);
    tag(&repo, acme.id, "VIP", false);
    tag(&repo, other.id, "Lead", false);

    let duplicate = repo.create_tag(&NewTag {
        company_id: acme.id,
        name: TagName::new("Lead").unwrap(),
        color: HexColor::new("#000000").unwrap(),
        kanban: false,
    });
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    let (total, kanban) = repo
        .list_tags(TagListQuery::new(acme.id).kanban(true))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(kanban[0].name.as_str(), "Lead");
}

#[test]
fn test_contact_import_skips_duplicates() {
    let test_db = common::TestDb::new("test_contact_import_skips_duplicates.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");

    repo.create_contact(&contact(acme.id, "Ana", "5511987654321"))
        .unwrap();

    let inserted = repo
        .import_contacts(&[
            contact(acme.id, "Ana again", "+55 11 98765-4321"),
            contact(acme.id, "Bruno", "5511912345678"),
        ])
        .unwrap();
    assert_eq!(inserted, 1);

    let (total, _) = repo.list_contacts(ContactListQuery::new(acme.id)).unwrap();
    assert_eq!(total, 2);

    let bruno = repo
        .get_contact_by_number(&PhoneNumber::new("+5511912345678").unwrap(), acme.id)
        .unwrap()
        .unwrap();
    assert_eq!(bruno.name.as_str(), "Bruno");
    assert!(bruno.active);
}

#[test]
fn test_contact_tags_and_blocking() {
    let test_db = common::TestDb::new("test_contact_tags_and_blocking.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");

    let vip = tag(&repo, acme.id, "VIP", false);
    let created = repo
        .create_contact(&contact(acme.id, "Ana", "5511987654321"))
        .unwrap();

    repo.set_contact_tags(created.id, &[vip.id]).unwrap();
    let tagged = repo.get_contact_by_id(created.id, acme.id).unwrap().unwrap();
    assert_eq!(tagged.tags.len(), 1);
    assert_eq!(tagged.tags[0].id, vip.id);

    let blocked = repo.set_contact_active(created.id, false).unwrap();
    assert!(!blocked.active);
    assert_eq!(blocked.tags.len(), 1);
}

#[test]
fn test_ticket_lanes_and_visibility() {
    let test_db = common::TestDb::new("test_ticket_lanes_and_visibility.db");
    let repo = test_db.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let agent = common::seed_user(&repo, &acme, "Bea", "bea@acme.com");

    let ana = repo
        .create_contact(&contact(acme.id, "Ana", "5511987654321"))
        .unwrap();
    let new_ticket = |user_id| NewTicket {
        company_id: acme.id,
        contact_id: ana.id,
        user_id,
        status: TicketStatus::Open,
    };
    let mine = repo.create_ticket(&new_ticket(Some(agent.id))).unwrap();
    let unassigned = repo.create_ticket(&new_ticket(None)).unwrap();
    let theirs = repo.create_ticket(&new_ticket(Some(admin.id))).unwrap();

    let (total, visible) = repo
        .list_tickets(TicketListQuery::new(acme.id).visible_to(agent.id))
        .unwrap();
    assert_eq!(total, 2);
    assert!(visible.iter().all(|t| t.id != theirs.id));

    let todo = tag(&repo, acme.id, "A fazer", true);
    let doing = tag(&repo, acme.id, "Fazendo", true);
    let vip = tag(&repo, acme.id, "VIP", false);

    repo.move_ticket_to_lane(mine.id, vip.id).unwrap();
    repo.move_ticket_to_lane(mine.id, todo.id).unwrap();
    let moved = repo.move_ticket_to_lane(mine.id, doing.id).unwrap();
    let mut tag_ids: Vec<i32> = moved.tags.iter().map(|t| t.id.get()).collect();
    tag_ids.sort();
    let mut expected = vec![doing.id.get(), vip.id.get()];
    expected.sort();
    assert_eq!(tag_ids, expected);

    let cleared = repo.clear_ticket_lanes(mine.id).unwrap();
    assert_eq!(cleared.tags.len(), 1);
    assert_eq!(cleared.tags[0].id, vip.id);

    let closed = repo
        .update_ticket(
            unassigned.id,
            &UpdateTicket {
                status: TicketStatus::Closed,
                user_id: None,
            },
        )
        .unwrap();
    assert_eq!(closed.status, TicketStatus::Closed);

    let (open_total, _) = repo
        .list_tickets(
            TicketListQuery::new(acme.id)
                .status(TicketStatus::Open)
                .status(TicketStatus::Pending),
        )
        .unwrap();
    assert_eq!(open_total, 2);
}

#[test]
fn test_campaign_status_and_schedule_listing() {
    let test_db = common::TestDb::new("test_campaign_status_and_schedule_listing.db");
    let repo = test_db.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");

    let audience = repo
        .create_contact_list(&NewContactList {
            company_id: acme.id,
            name: ContactListName::new("Clientes VIP").unwrap(),
        })
        .unwrap();

    let campaign = repo
        .create_campaign(&NewCampaign {
            company_id: acme.id,
            name: CampaignName::new("Black Friday").unwrap(),
            message: MessageBody::new("Ofertas!").unwrap(),
            contact_list_id: Some(audience.id),
            whatsapp_id: None,
            scheduled_at: Some(at(9)),
            confirmation: false,
        })
        .unwrap();
    assert_eq!(campaign.status, CampaignStatus::Scheduled);
    assert_eq!(
        campaign.contact_list.as_ref().map(|l| l.name.as_str()),
        Some("Clientes VIP")
    );

    let cancelled = repo
        .set_campaign_status(campaign.id, CampaignStatus::Cancelled)
        .unwrap();
    assert_eq!(cancelled.status, CampaignStatus::Cancelled);
    let (total, _) = repo
        .list_campaigns(ojos_chat::repository::CampaignListQuery::new(acme.id))
        .unwrap();
    assert_eq!(total, 1);

    let ana = repo
        .create_contact(&contact(acme.id, "Ana", "5511987654321"))
        .unwrap();
    let bruno = repo
        .create_contact(&contact(acme.id, "Bruno", "5511912345678"))
        .unwrap();
    for (contact_id, hour) in [(ana.id, 15), (bruno.id, 10), (ana.id, 8)] {
        repo.create_schedule(&NewSchedule {
            company_id: acme.id,
            contact_id,
            user_id: Some(admin.id),
            body: MessageBody::new("Lembrete").unwrap(),
            send_at: at(hour) + Duration::days(1),
        })
        .unwrap();
    }

    let (total, for_ana) = repo
        .list_schedules(ScheduleListQuery::new(acme.id).contact(ana.id))
        .unwrap();
    assert_eq!(total, 2);
    assert!(for_ana[0].send_at < for_ana[1].send_at);
    assert!(repo.get_schedule_by_id(for_ana[0].id, acme.id).unwrap().is_some());
}

fn list_item(list: &ContactList, name: &str, number: &str) -> NewContactListItem {
    NewContactListItem {
        company_id: list.company_id,
        contact_list_id: list.id,
        name: ContactName::new(name).unwrap(),
        number: PhoneNumber::new(number).unwrap(),
        email: None,
    }
}

#[test]
fn test_contact_list_counts_and_dedupe() {
    let test_db = common::TestDb::new("test_contact_list_counts_and_dedupe.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let (globex, _) = common::seed_company(&repo, "Globex", "admin@globex.com");

    let vip = repo
        .create_contact_list(&NewContactList {
            company_id: acme.id,
            name: ContactListName::new("VIP").unwrap(),
        })
        .unwrap();
    assert_eq!(vip.contacts_count, 0);

    let inserted = repo
        .import_contact_list_items(&[
            list_item(&vip, "Ana", "5511987654321"),
            list_item(&vip, "Bruno", "5511912345678"),
            list_item(&vip, "Ana again", "5511987654321"),
        ])
        .unwrap();
    assert_eq!(inserted, 2);

    let duplicate = repo.create_contact_list_item(&list_item(&vip, "Ana", "5511987654321"));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    let (total, lists) = repo
        .list_contact_lists(ContactListsQuery::new(acme.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(lists[0].contacts_count, 2);
    assert!(repo.get_contact_list_by_id(vip.id, globex.id).unwrap().is_none());

    let (total, items) = repo
        .list_contact_list_items(ContactListItemQuery::new(acme.id, vip.id).search("Bru"))
        .unwrap();
    assert_eq!(total, 1);
    let bruno = repo
        .update_contact_list_item(
            items[0].id,
            &UpdateContactListItem {
                name: ContactName::new("Bruno Silva").unwrap(),
                number: items[0].number.clone(),
                email: None,
            },
        )
        .unwrap();
    assert_eq!(bruno.name.as_str(), "Bruno Silva");

    let renamed = repo
        .rename_contact_list(vip.id, &ContactListName::new("Clientes VIP").unwrap())
        .unwrap();
    assert_eq!(renamed.contacts_count, 2);

    repo.delete_contact_list(vip.id).unwrap();
    assert!(repo.get_contact_list_item_by_id(bruno.id, acme.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_contact_list(vip.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_deleting_audience_detaches_campaign() {
    let test_db = common::TestDb::new("test_deleting_audience_detaches_campaign.db");
    let repo = test_db.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");

    let list = repo
        .create_contact_list(&NewContactList {
            company_id: acme.id,
            name: ContactListName::new("Leads").unwrap(),
        })
        .unwrap();
    let campaign = repo
        .create_campaign(&NewCampaign {
            company_id: acme.id,
            name: CampaignName::new("Boas-vindas").unwrap(),
            message: MessageBody::new("Olá").unwrap(),
            contact_list_id: Some(list.id),
            whatsapp_id: None,
            scheduled_at: None,
            confirmation: false,
        })
        .unwrap();

    repo.delete_contact_list(list.id).unwrap();

    let campaign = repo.get_campaign_by_id(campaign.id, acme.id).unwrap().unwrap();
    assert_eq!(campaign.contact_list_id, None);
    assert_eq!(campaign.contact_list, None);
}

#[test]
fn test_flow_graph_and_scoping() {
    let test_db = common::TestDb::new("test_flow_graph_and_scoping.db");
    let repo = test_db.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let (globex, _) = common::seed_company(&repo, "Globex", "admin@globex.com");

    let flow = repo
        .create_flow(&NewFlow {
            company_id: acme.id,
            user_id: Some(admin.id),
            name: FlowName::new("Atendimento").unwrap(),
            active: true,
            flow: None,
        })
        .unwrap();
    assert_eq!(flow.flow, None);

    let graph = serde_json::json!({"nodes": [{"id": "1", "type": "start"}], "connections": []});
    let saved = repo.save_flow_graph(flow.id, &graph).unwrap();
    assert_eq!(saved.flow, Some(graph));

    let updated = repo
        .update_flow(
            flow.id,
            &UpdateFlow {
                name: FlowName::new("Atendimento 24h").unwrap(),
                active: false,
            },
        )
        .unwrap();
    assert!(!updated.active);
    assert_eq!(updated.flow, saved.flow);

    assert!(repo.get_flow_by_id(flow.id, globex.id).unwrap().is_none());
    let (total, _) = repo.list_flows(FlowListQuery::new(globex.id)).unwrap();
    assert_eq!(total, 0);
    let (total, flows) = repo
        .list_flows(FlowListQuery::new(acme.id).search("24h"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(flows[0].id, flow.id);

    repo.delete_flow(flow.id).unwrap();
    assert!(matches!(repo.delete_flow(flow.id), Err(RepositoryError::NotFound)));
}

#[test]
fn test_quick_messages_visibility() {
    let test_db = common::TestDb::new("test_quick_messages_visibility.db");
    let repo = test_db.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let agent = common::seed_user(&repo, &acme, "Bea", "bea@acme.com");

    let record = |user_id, shortcode: &str, geral| NewQuickMessage {
        company_id: acme.id,
        user_id,
        shortcode: Shortcode::new(shortcode).unwrap(),
        message: MessageBody::new("Olá!").unwrap(),
        geral,
    };
    repo.create_quick_message(&record(admin.id, "ola", true)).unwrap();
    let private = repo
        .create_quick_message(&record(admin.id, "privado", false))
        .unwrap();
    repo.create_quick_message(&record(agent.id, "meu", false))
        .unwrap();

    let duplicate = repo.create_quick_message(&record(agent.id, "ola", false));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    let (total, visible) = repo
        .list_quick_messages(QuickMessageListQuery::new(acme.id, agent.id))
        .unwrap();
    assert_eq!(total, 2);
    assert!(visible.iter().all(|r| r.id != private.id));
    assert!(
        repo.get_quick_message_by_id(private.id, acme.id)
            .unwrap()
            .is_some()
    );
}
