//! Paginated list responses, one per resource, named after the JSON key the
//! frontend reads the records from.

use serde::Serialize;

use crate::domain::{
    campaign::Campaign,
    company::Company,
    contact::Contact,
    contact_list::{ContactList, ContactListItem},
    flow::Flow,
    quick_message::QuickMessage,
    schedule::Schedule,
    tag::Tag,
    ticket::Ticket,
    user::User,
};
use crate::pagination::Page;

macro_rules! page_response {
    ($name:ident, $field:ident, $item:ty) => {
        #[derive(Debug, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub $field: Vec<$item>,
            pub count: usize,
            pub has_more: bool,
        }

        impl From<Page<$item>> for $name {
            fn from(page: Page<$item>) -> Self {
                Self {
                    $field: page.items,
                    count: page.count,
                    has_more: page.has_more,
                }
            }
        }
    };
}

page_response!(CompaniesResponse, companies, Company);
page_response!(UsersResponse, users, User);
page_response!(TagsResponse, tags, Tag);
page_response!(ContactsResponse, contacts, Contact);
page_response!(TicketsResponse, tickets, Ticket);
page_response!(CampaignsResponse, records, Campaign);
page_response!(SchedulesResponse, schedules, Schedule);
page_response!(QuickMessagesResponse, records, QuickMessage);
page_response!(ContactListsResponse, records, ContactList);
page_response!(ContactListItemsResponse, contacts, ContactListItem);
page_response!(FlowsResponse, flows, Flow);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_is_exposed_under_resource_key() {
        let page: Page<Tag> = Page::new(Vec::new(), 41, 40);
        let body = serde_json::to_value(TagsResponse::from(page)).unwrap();
        assert_eq!(body, json!({"tags": [], "count": 41, "hasMore": true}));
    }
}
