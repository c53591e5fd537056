//! Rendering of tweets, users, lists and direct messages
//!
//! Each record kind prints in one of three layouts: plain (messages or bare
//! names), long (a table) and CSV. JSON output serializes the records as
//! received.

use clap::ValueEnum;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;

use tw_core::{DirectMessage, List, Tweet, User};

use super::{Formatter, Layout};

pub const TWEET_HEADINGS: &[&str] = &["ID", "Posted at", "Screen name", "Text"];

pub const USER_HEADINGS: &[&str] = &[
    "ID",
    "Since",
    "Last tweeted at",
    "Tweets",
    "Favorites",
    "Listed",
    "Following",
    "Followers",
    "Screen name",
    "Name",
    "Verified",
    "Protected",
    "Bio",
    "Status",
    "Location",
    "URL",
];

pub const LIST_HEADINGS: &[&str] = &[
    "ID",
    "Created at",
    "Screen name",
    "Slug",
    "Members",
    "Subscribers",
    "Mode",
    "Description",
];

/// Columns of `whois --csv`
pub const WHOIS_HEADINGS: &[&str] = &[
    "ID",
    "Verified",
    "Name",
    "Screen name",
    "Bio",
    "Location",
    "Following",
    "Last update",
    "Last updated at",
    "Since",
    "Tweets",
    "Favorites",
    "Listed",
    "Following",
    "Followers",
    "URL",
];

/// Columns of `list information --csv`
pub const LIST_INFO_HEADINGS: &[&str] = &[
    "ID",
    "Description",
    "Slug",
    "Screen name",
    "Created at",
    "Members",
    "Subscribers",
    "Following",
    "Mode",
    "URL",
];

const LIST_URL_BASE: &str = "https://twitter.com";

/// Older timestamps print with the year instead of the time of day
const SIX_MONTHS_SECS: i64 = 6 * 2_592_000;

/// `created_at` as shown in long output, relative to `now`
pub fn long_time(time: Option<Timestamp>, now: Timestamp, tz: &TimeZone) -> String {
    let Some(time) = time else {
        return String::new();
    };
    let zoned = time.to_zoned(tz.clone());
    if now.as_second() - time.as_second() < SIX_MONTHS_SECS {
        zoned.strftime("%b %e %H:%M").to_string()
    } else {
        zoned.strftime("%b %e  %Y").to_string()
    }
}

/// `created_at` as written to CSV, always UTC
pub fn csv_time(time: Option<Timestamp>) -> String {
    time.map(|t| t.to_zoned(TimeZone::UTC).strftime("%Y-%m-%d %H:%M:%S %z").to_string())
        .unwrap_or_default()
}

/// Rough distance between two instants, e.g. `about 2 hours`
pub fn time_ago(time: Option<Timestamp>, now: Timestamp) -> String {
    let Some(time) = time else {
        return String::new();
    };
    let minutes = (now.as_second() - time.as_second()).max(0) / 60;
    let days = minutes / 1440;

    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..45 => format!("{minutes} minutes"),
        45..90 => "about 1 hour".to_string(),
        90..1440 => format!("about {} hours", (minutes + 30) / 60),
        1440..2520 => "1 day".to_string(),
        2520..43200 => format!("{} days", (minutes + 720) / 1440),
        43200..64800 => "about 1 month".to_string(),
        64800..86400 => "about 2 months".to_string(),
        86400..525600 => format!("{} months", days / 30),
        _ => match days / 365 {
            1 => "about 1 year".to_string(),
            years => format!("about {years} years"),
        },
    }
}

/// `1234567` as `1,234,567`
pub fn with_delimiter(number: u64) -> String {
    let digits = number.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_string()
}

/// Clock and zone used for long-format timestamps
struct Clock {
    now: Timestamp,
    tz: TimeZone,
}

impl Clock {
    fn system() -> Self {
        Self {
            now: Timestamp::now(),
            tz: TimeZone::system(),
        }
    }

    fn format(&self, time: Option<Timestamp>) -> String {
        long_time(time, self.now, &self.tz)
    }

    /// Long timestamp followed by its age, e.g. `Jul 16 12:00 (about 2 hours ago)`
    fn format_with_age(&self, time: Option<Timestamp>) -> String {
        format!("{} ({} ago)", self.format(time), time_ago(time, self.now))
    }
}

fn emit<T: Serialize>(
    formatter: &Formatter,
    layout: Layout,
    records: &[T],
    headings: &[&str],
    long_row: impl Fn(&T, &Clock) -> Vec<String>,
    csv_row: impl Fn(&T) -> Vec<String>,
    plain: impl Fn(&Formatter, &[T]),
) {
    if formatter.is_json() {
        formatter.json(&records);
        return;
    }

    match layout {
        Layout::Csv => formatter.csv(headings, records.iter().map(csv_row).collect()),
        Layout::Long => {
            let clock = Clock::system();
            formatter.table(headings, records.iter().map(|r| long_row(r, &clock)).collect())
        }
        Layout::Plain => plain(formatter, records),
    }
}

pub fn print_tweets(formatter: &Formatter, layout: Layout, tweets: &[Tweet]) {
    emit(
        formatter,
        layout,
        tweets,
        TWEET_HEADINGS,
        |tweet, clock| {
            vec![
                tweet.id.to_string(),
                clock.format(tweet.created_at()),
                format!("@{}", tweet.screen_name()),
                single_line(&tweet.text),
            ]
        },
        tweet_csv_row,
        |formatter, tweets| {
            for tweet in tweets {
                formatter.message(tweet.screen_name(), &tweet.text);
            }
        },
    );
}

pub fn tweet_csv_row(tweet: &Tweet) -> Vec<String> {
    vec![
        tweet.id.to_string(),
        csv_time(tweet.created_at()),
        tweet.screen_name().to_string(),
        tweet.text.clone(),
    ]
}

/// Which side of a direct message is shown as the counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterpart {
    Sender,
    Recipient,
}

impl Counterpart {
    fn screen_name(self, message: &DirectMessage) -> &str {
        match self {
            Counterpart::Sender => &message.sender_screen_name,
            Counterpart::Recipient => &message.recipient_screen_name,
        }
    }
}

pub fn print_direct_messages(
    formatter: &Formatter,
    layout: Layout,
    messages: &[DirectMessage],
    counterpart: Counterpart,
) {
    emit(
        formatter,
        layout,
        messages,
        TWEET_HEADINGS,
        |message, clock| {
            vec![
                message.id.to_string(),
                clock.format(message.created_at()),
                format!("@{}", counterpart.screen_name(message)),
                single_line(&message.text),
            ]
        },
        |message| {
            vec![
                message.id.to_string(),
                csv_time(message.created_at()),
                counterpart.screen_name(message).to_string(),
                message.text.clone(),
            ]
        },
        |formatter, messages| {
            for message in messages {
                formatter.message(counterpart.screen_name(message), &message.text);
            }
        },
    );
}

pub fn print_users(formatter: &Formatter, layout: Layout, users: &[User]) {
    emit(
        formatter,
        layout,
        users,
        USER_HEADINGS,
        |user, clock| {
            vec![
                user.id.to_string(),
                clock.format(user.created_at()),
                clock.format(user.last_tweeted_at()),
                user.statuses_count.to_string(),
                user.favourites_count.to_string(),
                user.listed_count.to_string(),
                user.friends_count.to_string(),
                user.followers_count.to_string(),
                format!("@{}", user.screen_name),
                user.name.clone(),
                yes_no(user.verified),
                yes_no(user.protected),
                single_line(user.description.as_deref().unwrap_or_default()),
                user.status
                    .as_deref()
                    .map(|status| single_line(&status.text))
                    .unwrap_or_default(),
                user.location.clone().unwrap_or_default(),
                user.url.clone().unwrap_or_default(),
            ]
        },
        user_csv_row,
        |formatter, users| {
            for user in users {
                formatter.println(&user.screen_name);
            }
        },
    );
}

pub fn user_csv_row(user: &User) -> Vec<String> {
    vec![
        user.id.to_string(),
        csv_time(user.created_at()),
        csv_time(user.last_tweeted_at()),
        user.statuses_count.to_string(),
        user.favourites_count.to_string(),
        user.listed_count.to_string(),
        user.friends_count.to_string(),
        user.followers_count.to_string(),
        user.screen_name.clone(),
        user.name.clone(),
        user.verified.to_string(),
        user.protected.to_string(),
        user.description.clone().unwrap_or_default(),
        user.status
            .as_deref()
            .map(|status| status.text.clone())
            .unwrap_or_default(),
        user.location.clone().unwrap_or_default(),
        user.url.clone().unwrap_or_default(),
    ]
}

pub fn print_lists(formatter: &Formatter, layout: Layout, lists: &[List]) {
    emit(
        formatter,
        layout,
        lists,
        LIST_HEADINGS,
        |list, clock| {
            vec![
                list.id.to_string(),
                clock.format(list.created_at()),
                format!("@{}", list.owner_screen_name()),
                list.slug.clone(),
                list.member_count.to_string(),
                list.subscriber_count.to_string(),
                list.mode.clone(),
                single_line(list.description.as_deref().unwrap_or_default()),
            ]
        },
        |list| {
            vec![
                list.id.to_string(),
                csv_time(list.created_at()),
                list.owner_screen_name().to_string(),
                list.slug.clone(),
                list.member_count.to_string(),
                list.subscriber_count.to_string(),
                list.mode.clone(),
                list.description.clone().unwrap_or_default(),
            ]
        },
        |formatter, lists| {
            for list in lists {
                formatter.println(&list.full_name);
            }
        },
    );
}

/// `whois`: every detail of one account
pub fn print_user_details(formatter: &Formatter, csv: bool, user: &User) {
    if formatter.is_json() {
        formatter.json(user);
    } else if csv {
        formatter.csv(WHOIS_HEADINGS, vec![whois_csv_row(user)]);
    } else {
        formatter.fields(user_details(user, &Clock::system()));
    }
}

fn user_details(user: &User, clock: &Clock) -> Vec<(&'static str, String)> {
    let mut rows = vec![("ID", user.id.to_string())];
    if !user.name.is_empty() {
        let label = if user.verified { "Name (Verified)" } else { "Name" };
        rows.push((label, user.name.clone()));
    }
    if let Some(bio) = &user.description {
        rows.push(("Bio", single_line(bio)));
    }
    if let Some(location) = &user.location {
        rows.push(("Location", location.clone()));
    }
    rows.push(("Status", following_status(user.following.unwrap_or_default())));
    if let Some(status) = user.status.as_deref() {
        rows.push((
            "Last update",
            format!("{} ({} ago)", single_line(&status.text), time_ago(status.created_at(), clock.now)),
        ));
    }
    rows.push(("Since", clock.format_with_age(user.created_at())));
    rows.push(("Tweets", with_delimiter(user.statuses_count)));
    rows.push(("Favorites", with_delimiter(user.favourites_count)));
    rows.push(("Listed", with_delimiter(user.listed_count)));
    rows.push(("Following", with_delimiter(user.friends_count)));
    rows.push(("Followers", with_delimiter(user.followers_count)));
    if let Some(url) = &user.url {
        rows.push(("URL", url.clone()));
    }
    rows
}

fn whois_csv_row(user: &User) -> Vec<String> {
    vec![
        user.id.to_string(),
        user.verified.to_string(),
        user.name.clone(),
        user.screen_name.clone(),
        user.description.clone().unwrap_or_default(),
        user.location.clone().unwrap_or_default(),
        user.following.unwrap_or_default().to_string(),
        user.status
            .as_deref()
            .map(|status| status.text.clone())
            .unwrap_or_default(),
        csv_time(user.last_tweeted_at()),
        csv_time(user.created_at()),
        user.statuses_count.to_string(),
        user.favourites_count.to_string(),
        user.listed_count.to_string(),
        user.friends_count.to_string(),
        user.followers_count.to_string(),
        user.url.clone().unwrap_or_default(),
    ]
}

/// `list information`: every detail of one list
pub fn print_list_details(formatter: &Formatter, csv: bool, list: &List) {
    if formatter.is_json() {
        formatter.json(list);
    } else if csv {
        formatter.csv(LIST_INFO_HEADINGS, vec![list_info_csv_row(list)]);
    } else {
        formatter.fields(list_details(list, &Clock::system()));
    }
}

fn list_details(list: &List, clock: &Clock) -> Vec<(&'static str, String)> {
    let mut rows = vec![("ID", list.id.to_string())];
    if let Some(description) = &list.description {
        rows.push(("Description", description.clone()));
    }
    rows.push(("Slug", list.slug.clone()));
    rows.push(("Screen name", format!("@{}", list.owner_screen_name())));
    rows.push(("Created at", clock.format_with_age(list.created_at())));
    rows.push(("Members", with_delimiter(list.member_count)));
    rows.push(("Subscribers", with_delimiter(list.subscriber_count)));
    rows.push(("Status", following_status(list.following)));
    rows.push(("Mode", list.mode.clone()));
    rows.push(("URL", format!("{LIST_URL_BASE}{}", list.uri)));
    rows
}

fn list_info_csv_row(list: &List) -> Vec<String> {
    vec![
        list.id.to_string(),
        list.description.clone().unwrap_or_default(),
        list.slug.clone(),
        list.owner_screen_name().to_string(),
        csv_time(list.created_at()),
        list.member_count.to_string(),
        list.subscriber_count.to_string(),
        list.following.to_string(),
        list.mode.clone(),
        format!("{LIST_URL_BASE}{}", list.uri),
    ]
}

fn following_status(following: bool) -> String {
    let status = if following { "Following" } else { "Not following" };
    status.to_string()
}

/// Sort key for user output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UserSort {
    #[default]
    #[value(name = "screen_name")]
    ScreenName,
    Favorites,
    Followers,
    Friends,
    Listed,
    Since,
    Tweets,
    Tweeted,
}

/// Sort key for list output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListSort {
    #[default]
    Slug,
    Members,
    Mode,
    Since,
    Subscribers,
}

/// `--sort`, `--reverse` and `--unsorted` for commands printing users
#[derive(clap::Args, Debug, Clone, Default)]
pub struct UserSortArgs {
    /// Specify the order of the results
    #[arg(short, long, value_enum, default_value_t = UserSort::ScreenName)]
    pub sort: UserSort,

    /// Reverse the order of the sort
    #[arg(short, long)]
    pub reverse: bool,

    /// Output is not sorted
    #[arg(short, long)]
    pub unsorted: bool,
}

impl UserSortArgs {
    pub fn apply(&self, users: &mut [User]) {
        sort_users(users, self.sort, self.reverse, self.unsorted);
    }
}

/// `--sort`, `--reverse` and `--unsorted` for commands printing lists
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListSortArgs {
    /// Specify the order of the results
    #[arg(short, long, value_enum, default_value_t = ListSort::Slug)]
    pub sort: ListSort,

    /// Reverse the order of the sort
    #[arg(short, long)]
    pub reverse: bool,

    /// Output is not sorted
    #[arg(short, long)]
    pub unsorted: bool,
}

impl ListSortArgs {
    pub fn apply(&self, lists: &mut [List]) {
        sort_lists(lists, self.sort, self.reverse, self.unsorted);
    }
}

/// Order users the way `--sort`, `--reverse` and `--unsorted` ask
pub fn sort_users(users: &mut [User], sort: UserSort, reverse: bool, unsorted: bool) {
    if !unsorted {
        match sort {
            UserSort::ScreenName => users.sort_by_key(|u| u.screen_name.to_lowercase()),
            UserSort::Favorites => users.sort_by_key(|u| u.favourites_count),
            UserSort::Followers => users.sort_by_key(|u| u.followers_count),
            UserSort::Friends => users.sort_by_key(|u| u.friends_count),
            UserSort::Listed => users.sort_by_key(|u| u.listed_count),
            UserSort::Since => users.sort_by_key(|u| u.created_at()),
            UserSort::Tweets => users.sort_by_key(|u| u.statuses_count),
            UserSort::Tweeted => users.sort_by_key(|u| u.last_tweeted_at()),
        }
    }
    if reverse {
        users.reverse();
    }
}

/// Order lists the way `--sort`, `--reverse` and `--unsorted` ask
pub fn sort_lists(lists: &mut [List], sort: ListSort, reverse: bool, unsorted: bool) {
    if !unsorted {
        match sort {
            ListSort::Slug => lists.sort_by_key(|l| l.slug.to_lowercase()),
            ListSort::Members => lists.sort_by_key(|l| l.member_count),
            ListSort::Mode => lists.sort_by(|a, b| a.mode.cmp(&b.mode)),
            ListSort::Since => lists.sort_by_key(|l| l.created_at()),
            ListSort::Subscribers => lists.sort_by_key(|l| l.subscriber_count),
        }
    }
    if reverse {
        lists.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, screen_name: &str, followers: u64) -> User {
        User {
            id,
            screen_name: screen_name.to_string(),
            followers_count: followers,
            ..Default::default()
        }
    }

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.screen_name.as_str()).collect()
    }

    #[test]
    fn test_sort_users_by_screen_name_ignores_case() {
        let mut users = vec![user(1, "pengwynn", 10), user(2, "Sferik", 30), user(3, "barelyknown", 20)];
        sort_users(&mut users, UserSort::ScreenName, false, false);
        assert_eq!(names(&users), vec!["barelyknown", "pengwynn", "Sferik"]);
    }

    #[test]
    fn test_sort_users_by_followers_reversed() {
        let mut users = vec![user(1, "pengwynn", 10), user(2, "sferik", 30), user(3, "barelyknown", 20)];
        sort_users(&mut users, UserSort::Followers, true, false);
        assert_eq!(names(&users), vec!["sferik", "barelyknown", "pengwynn"]);
    }

    #[test]
    fn test_unsorted_keeps_server_order() {
        let mut users = vec![user(1, "pengwynn", 10), user(2, "sferik", 30), user(3, "barelyknown", 20)];
        sort_users(&mut users, UserSort::ScreenName, false, true);
        assert_eq!(names(&users), vec!["pengwynn", "sferik", "barelyknown"]);

        sort_users(&mut users, UserSort::ScreenName, true, true);
        assert_eq!(names(&users), vec!["barelyknown", "sferik", "pengwynn"]);
    }

    #[test]
    fn test_sort_lists_by_members() {
        let list = |slug: &str, members: u64| List {
            slug: slug.to_string(),
            member_count: members,
            ..Default::default()
        };
        let mut lists = vec![list("presidents", 2), list("Developers", 9), list("cool", 5)];

        sort_lists(&mut lists, ListSort::Slug, false, false);
        let slugs: Vec<&str> = lists.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cool", "Developers", "presidents"]);

        sort_lists(&mut lists, ListSort::Members, false, false);
        let slugs: Vec<&str> = lists.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, vec!["presidents", "cool", "Developers"]);
    }

    #[test]
    fn test_long_time_recent_and_old() {
        let now: Timestamp = "2011-11-24T16:20:00Z".parse().unwrap();
        let recent: Timestamp = "2011-11-20T09:05:00Z".parse().unwrap();
        let old: Timestamp = "2011-04-01T09:05:00Z".parse().unwrap();

        assert_eq!(long_time(Some(recent), now, &TimeZone::UTC), "Nov 20 09:05");
        assert_eq!(long_time(Some(old), now, &TimeZone::UTC), "Apr  1  2011");
        assert_eq!(long_time(None, now, &TimeZone::UTC), "");
    }

    #[test]
    fn test_csv_time() {
        let time = tw_core::types::parse_created_at("Wed Aug 27 13:08:45 +0000 2008");
        assert_eq!(csv_time(time), "2008-08-27 13:08:45 +0000");
        assert_eq!(csv_time(None), "");
    }

    #[test]
    fn test_tweet_csv_row() {
        let tweet: Tweet = serde_json::from_str(
            r#"{"id": 247827742178021376, "created_at": "Wed Aug 27 13:08:45 +0000 2008",
                "text": "Ruby, Rust", "user": {"id": 7505382, "screen_name": "sferik"}}"#,
        )
        .unwrap();
        assert_eq!(
            tweet_csv_row(&tweet),
            vec!["247827742178021376", "2008-08-27 13:08:45 +0000", "sferik", "Ruby, Rust"]
        );
    }

    #[test]
    fn test_user_csv_row_flags() {
        let mut sferik = user(7505382, "sferik", 2000);
        sferik.verified = true;
        let row = user_csv_row(&sferik);
        assert_eq!(row.len(), USER_HEADINGS.len());
        assert_eq!(row[7], "2000");
        assert_eq!(row[10], "true");
        assert_eq!(row[11], "false");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("one\n\ntwo  three"), "one two three");
    }

    #[test]
    fn test_time_ago() {
        let now: Timestamp = "2011-11-24T16:20:00Z".parse().unwrap();
        let ago = |secs: i64| time_ago(Some(now - jiff::SignedDuration::from_secs(secs)), now);

        assert_eq!(ago(20), "less than a minute");
        assert_eq!(ago(60), "1 minute");
        assert_eq!(ago(30 * 60), "30 minutes");
        assert_eq!(ago(60 * 60), "about 1 hour");
        assert_eq!(ago(5 * 3600), "about 5 hours");
        assert_eq!(ago(26 * 3600), "1 day");
        assert_eq!(ago(10 * 86400), "10 days");
        assert_eq!(ago(35 * 86400), "about 1 month");
        assert_eq!(ago(120 * 86400), "4 months");
        assert_eq!(ago(400 * 86400), "about 1 year");
        assert_eq!(ago(3 * 365 * 86400), "about 3 years");
        assert_eq!(time_ago(None, now), "");
    }

    #[test]
    fn test_with_delimiter() {
        assert_eq!(with_delimiter(0), "0");
        assert_eq!(with_delimiter(999), "999");
        assert_eq!(with_delimiter(1000), "1,000");
        assert_eq!(with_delimiter(7505382), "7,505,382");
    }

    #[test]
    fn test_user_details_rows() {
        let clock = Clock {
            now: "2011-11-24T16:20:00Z".parse().unwrap(),
            tz: TimeZone::UTC,
        };
        let sferik: User = serde_json::from_str(
            r#"{"id": 7505382, "screen_name": "sferik", "name": "Erik Michaels-Ober",
                "verified": true, "following": false, "created_at": "Wed Jul 16 12:59:01 +0000 2008",
                "statuses_count": 7890, "favourites_count": 2, "listed_count": 10,
                "friends_count": 200, "followers_count": 1048, "description": "Vagabond.\nRubyist."}"#,
        )
        .unwrap();

        let rows = user_details(&sferik, &clock);
        let labels: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "ID", "Name (Verified)", "Bio", "Status", "Since", "Tweets", "Favorites", "Listed",
                "Following", "Followers",
            ]
        );
        assert_eq!(rows[2].1, "Vagabond. Rubyist.");
        assert_eq!(rows[3].1, "Not following");
        assert_eq!(rows[4].1, "Jul 16  2008 (about 3 years ago)");
        assert_eq!(rows[5].1, "7,890");
        assert_eq!(rows[9].1, "1,048");
        assert_eq!(whois_csv_row(&sferik).len(), WHOIS_HEADINGS.len());
    }

    #[test]
    fn test_list_details_rows() {
        let clock = Clock {
            now: "2011-11-24T16:20:00Z".parse().unwrap(),
            tz: TimeZone::UTC,
        };
        let list = List {
            id: 8863586,
            slug: "presidents".to_string(),
            member_count: 1234,
            mode: "public".to_string(),
            following: true,
            uri: "/sferik/presidents".to_string(),
            created_at: "Fri Mar 18 21:34:52 +0000 2011".to_string(),
            user: Some(user(7505382, "sferik", 0)),
            ..Default::default()
        };

        let rows = list_details(&list, &clock);
        assert_eq!(rows[1], ("Slug", "presidents".to_string()));
        assert_eq!(rows[2], ("Screen name", "@sferik".to_string()));
        assert_eq!(rows[3], ("Created at", "Mar 18  2011 (8 months ago)".to_string()));
        assert_eq!(rows[4], ("Members", "1,234".to_string()));
        assert_eq!(rows[6], ("Status", "Following".to_string()));
        assert_eq!(
            rows.last(),
            Some(&("URL", "https://twitter.com/sferik/presidents".to_string()))
        );
        assert_eq!(list_info_csv_row(&list).len(), LIST_INFO_HEADINGS.len());
    }
}
