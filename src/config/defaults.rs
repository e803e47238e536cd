//! Built-in key table

use super::schema::KeySpec;
use crate::values::EnumKind;
use serde_json::{Value, json};

/// Every key the bot recognizes, with its tier, coercion kind and default
pub(crate) fn builtin_keys() -> Vec<KeySpec> {
    let mut keys = public_keys();
    keys.extend(private_keys());
    keys.extend(protected_keys());
    keys
}

fn public_keys() -> Vec<KeySpec> {
    let p = KeySpec::public;
    let none = || Value::Null;
    let zero = || json!("P0D");

    vec![
        // activity
        p("twitch_url", json!("https://www.twitch.tv/gameparadiselive/")),
        // bot settings
        p("main_category_id", none()),
        p("fallback_category_id", none()),
        p("prefix", json!("?")),
        p(
            "mention",
            json!("<@&1099731910160298004> <@&1099473545786032188>"),
        ),
        p("main_color", json!("#5865f2")).color(),
        p("error_color", json!("#e74c3c")).color(),
        p("user_typing", json!(true)).boolean(),
        p("mod_typing", json!(true)).boolean(),
        p("account_age", zero()).duration(),
        p("guild_age", zero()).duration(),
        p("thread_cooldown", zero()).duration(),
        p("reply_without_command", json!(true)).boolean(),
        p("anon_reply_without_command", json!(false)).boolean(),
        p("plain_reply_without_command", json!(false)).boolean(),
        // logging
        p("log_channel_id", none()),
        p("mention_channel_id", none()),
        p("update_channel_id", none()),
        // updates
        p("update_notifications", json!(true)).boolean(),
        // threads
        p("sent_emoji", json!("<:yes:1101562256392724570>")),
        p("blocked_emoji", json!("`<:no:1101562252798202006>")),
        p("close_emoji", json!("\u{1f512}")),
        p("use_user_id_channel_name", json!(false)).boolean(),
        p("use_timestamp_channel_name", json!(false)).boolean(),
        p("use_nickname_channel_name", json!(false)).boolean(),
        p("use_random_channel_name", json!(false)).boolean(),
        p("recipient_thread_close", json!(false)).boolean(),
        p("thread_show_roles", json!(false)).boolean(),
        p("thread_show_account_age", json!(true)).boolean(),
        p("thread_show_join_age", json!(true)).boolean(),
        p(
            "thread_cancelled",
            json!("Cancelled by you or the system."),
        ),
        p("thread_auto_close_silently", json!(false)).boolean(),
        p("thread_auto_close", zero()).duration(),
        p(
            "thread_auto_close_response",
            json!("This thread has been closed automatically due to inactivity after {timeout}."),
        ),
        p(
            "thread_creation_response",
            json!("The staff team will get back to you as soon as possible."),
        ),
        p("thread_creation_footer", json!("Your message has been sent")),
        p("thread_contact_silently", json!(false)).boolean(),
        p(
            "thread_self_closable_creation_footer",
            json!("Click the lock to close the thread"),
        ),
        p("thread_creation_contact_title", json!("New Thread")),
        p(
            "thread_creation_self_contact_response",
            json!("You have opened a Modmail thread."),
        ),
        p(
            "thread_creation_contact_response",
            json!("{creator.name} has opened a Modmail thread."),
        ),
        p("thread_creation_title", json!("Thread Created")),
        p(
            "thread_close_footer",
            json!("Replying will create a new thread"),
        ),
        p("thread_close_title", json!("Thread Closed")),
        p(
            "thread_close_response",
            json!("{closer.mention} has closed this Modmail thread."),
        ),
        p(
            "thread_self_close_response",
            json!("You have closed this Modmail thread."),
        ),
        p("thread_move_title", json!("Thread Moved")),
        p("thread_move_notify", json!(false)).boolean(),
        p("thread_move_notify_mods", json!(true)).boolean(),
        p("thread_move_response", json!("This thread has been moved.")),
        p("cooldown_thread_title", json!("Message not sent!")),
        p(
            "cooldown_thread_response",
            json!("Your cooldown ends {delta}. Try contacting me then."),
        ),
        p("disabled_new_thread_title", json!("Not Delivered")),
        p(
            "disabled_new_thread_response",
            json!("We are not accepting new threads."),
        ),
        p(
            "disabled_new_thread_footer",
            json!("Please try again later..."),
        ),
        p("disabled_current_thread_title", json!("Not Delivered")),
        p(
            "disabled_current_thread_response",
            json!("We are not accepting any messages."),
        ),
        p(
            "disabled_current_thread_footer",
            json!("Please try again later..."),
        ),
        p("transfer_reactions", json!(false)).boolean(),
        p("close_on_leave", json!(true)).boolean(),
        p(
            "close_on_leave_reason",
            json!("The recipient has left the server."),
        ),
        p("alert_on_mention", json!(true)).boolean(),
        p("silent_alert_on_mention", json!(false)).boolean(),
        p("show_timestamp", json!(true)).boolean(),
        p("anonymous_snippets", json!(false)).boolean(),
        p("plain_snippets", json!(false)).boolean(),
        p("require_close_reason", json!(false)).boolean(),
        p("show_log_url_button", json!(false)).boolean(),
        // group conversations
        p("private_added_to_group_title", json!("New Thread (Group)")),
        p(
            "private_added_to_group_response",
            json!("{moderator.name} has added you to a Modmail thread."),
        ),
        p(
            "private_added_to_group_description_anon",
            json!("A moderator has added you to a Modmail thread."),
        ),
        p("public_added_to_group_title", json!("New User")),
        p(
            "public_added_to_group_response",
            json!("{moderator.name} has added {users} to the Modmail thread."),
        ),
        p(
            "public_added_to_group_description_anon",
            json!("A moderator has added {users} to the Modmail thread."),
        ),
        p(
            "private_removed_from_group_title",
            json!("Removed From Thread (Group)"),
        ),
        p(
            "private_removed_from_group_response",
            json!("{moderator.name} has removed you from the Modmail thread."),
        ),
        p(
            "private_removed_from_group_description_anon",
            json!("A moderator has removed you from the Modmail thread."),
        ),
        p("public_removed_from_group_title", json!("User Removed")),
        p(
            "public_removed_from_group_response",
            json!("{moderator.name} has removed {users} from the Modmail thread."),
        ),
        p(
            "public_removed_from_group_description_anon",
            json!("A moderator has removed {users} from the Modmail thread."),
        ),
        // moderation
        p("recipient_color", json!("#f1c40f")).color(),
        p("mod_color", json!("#2ecc71")).color(),
        p("mod_tag", none()),
        // anonymous message
        p("anon_username", none()),
        p("anon_avatar_url", none()),
        p("anon_tag", json!("Response")),
        // react to contact
        p("react_to_contact_message", none()),
        p("react_to_contact_emoji", json!("<:yes:1101562256392724570>")),
        // confirm thread creation
        p("confirm_thread_creation", json!(true)).boolean(),
        p("confirm_thread_creation_title", json!("Confirm thread creation")),
        p(
            "confirm_thread_response",
            json!("React to confirm thread creation which will directly contact the moderators"),
        ),
        p("confirm_thread_creation_accept", json!("<:yes:1101562256392724570>")),
        p("confirm_thread_creation_deny", json!("<:no:1101562252798202006>")),
        // regex
        p("use_regex_autotrigger", json!(false)).boolean(),
        p("use_hoisted_top_role", json!(false)).boolean(),
    ]
}

fn private_keys() -> Vec<KeySpec> {
    let p = KeySpec::private;

    vec![
        // bot presence
        p("activity_message", json!("")),
        p("activity_type", Value::Null).enumeration(EnumKind::ActivityType),
        p("status", Value::Null).enumeration(EnumKind::Status),
        p("dm_disabled", json!(0)).enumeration(EnumKind::DmDisabled),
        p("oauth_whitelist", json!([])),
        // moderation
        p("blocked", json!({})),
        p("blocked_roles", json!({})),
        p("blocked_whitelist", json!([])),
        p("command_permissions", json!({})).legacy_ids(),
        p("level_permissions", json!({})).legacy_ids(),
        p("override_command_level", json!({})),
        // threads
        p("snippets", json!({})),
        p("notification_squad", json!({})),
        p("subscriptions", json!({})),
        p("closures", json!({})),
        // misc
        p("plugins", json!([])),
        p("aliases", json!({})),
        p("auto_triggers", json!({})),
    ]
}

fn protected_keys() -> Vec<KeySpec> {
    let p = KeySpec::protected;
    let none = || Value::Null;

    vec![
        // modmail
        p("modmail_guild_id", none()),
        p("guild_id", none()),
        p("log_url", json!("https://example.com/")),
        p("log_url_prefix", json!("/logs")),
        p("mongo_uri", none()),
        p("database_type", json!("mongodb")),
        p("connection_uri", none()),
        p("owners", none()),
        // bot
        p("token", none()),
        p("enable_plugins", json!(true)).boolean(),
        p("enable_eval", json!(true)).boolean(),
        // github access token for private repositories
        p("github_token", none()),
        p("disable_autoupdates", json!(false)).boolean(),
        p("disable_updates", json!(false)).boolean(),
        // logging
        p("log_level", json!("INFO")),
        // data collection
        p("data_collection", json!(true)).boolean(),
    ]
}
