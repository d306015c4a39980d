use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use sqlx::{MySql, QueryBuilder};

use crate::database::models::User;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::normalize::Timestamp;
use crate::schemas::admin::user::{UserEditIn, UserInfoOut, UserListIn};
use crate::schemas::{is_mobile, PageParams, PageResult};
use crate::services::{unix_now, UrlUtil};
use crate::state::AppState;

/// User administration over the `user` table.
pub struct AdminUserService<'a> {
    state: &'a AppState,
    table: String,
    urls: UrlUtil,
}

impl<'a> AdminUserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            table: state.table("user"),
            urls: UrlUtil::new(&state.settings),
        }
    }

    pub async fn list(
        &self,
        page: &PageParams,
        filter: &UserListIn,
    ) -> Result<PageResult<UserInfoOut>, DatabaseError> {
        let tz = self.state.settings.tz();

        let mut count_query = QueryBuilder::<MySql>::new(format!("SELECT COUNT(*) FROM {}", self.table));
        push_filters(&mut count_query, filter, tz);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.state.pool)
            .await?;

        let mut list_query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM {}", User::COLUMNS, self.table));
        push_filters(&mut list_query, filter, tz);
        list_query
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows: Vec<User> = list_query
            .build_query_as()
            .fetch_all(&self.state.pool)
            .await?;

        let lists = rows.iter().map(|user| self.to_info(user)).collect();
        Ok(PageResult::create(lists, count, page))
    }

    pub async fn detail(&self, id: u32) -> Result<UserInfoOut, DatabaseError> {
        let user = self.find(id).await?;
        Ok(self.to_info(&user))
    }

    /// Change a single whitelisted column.
    pub async fn edit(&self, input: &UserEditIn) -> Result<(), ApiError> {
        let user = self.find(input.id).await?;
        let value = input.value.trim();

        let column = match input.field.as_str() {
            "realName" => {
                if value.chars().count() > 32 {
                    return Err(ApiError::params_valid("真实姓名不能超过32个字符"));
                }
                "real_name"
            }
            "sex" => {
                if !matches!(value, "0" | "1" | "2") {
                    return Err(ApiError::params_valid("性别设置错误"));
                }
                "sex"
            }
            "mobile" => {
                if !value.is_empty() && !is_mobile(value) {
                    return Err(ApiError::params_valid("手机号格式不正确"));
                }
                if !value.is_empty() && self.taken("mobile", value, user.id).await? {
                    return Err(ApiError::failed("手机号已被其它账号绑定"));
                }
                "mobile"
            }
            "username" => {
                if value.is_empty() {
                    return Err(ApiError::params_valid("账号不能为空"));
                }
                if self.taken("username", value, user.id).await? {
                    return Err(ApiError::failed("账号已被使用!"));
                }
                "username"
            }
            _ => return Err(ApiError::params_valid("不被支持的字段类型")),
        };

        let sql = format!("UPDATE {} SET {} = ?, update_time = ? WHERE id = ?", self.table, column);
        sqlx::query(&sql)
            .bind(value)
            .bind(unix_now())
            .bind(user.id)
            .execute(&self.state.pool)
            .await
            .map_err(DatabaseError::from)?;
        tracing::info!("Admin edited user {} field {}", user.id, input.field);
        Ok(())
    }

    async fn find(&self, id: u32) -> Result<User, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ? AND is_delete = 0 LIMIT 1",
            User::COLUMNS,
            self.table
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.state.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("用户不存在".to_string()))
    }

    /// Whether another live user already holds `value` in `column`.
    async fn taken(&self, column: &'static str, value: &str, except: u32) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ? AND id <> ? AND is_delete = 0",
            self.table, column
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(value)
            .bind(except)
            .fetch_one(&self.state.pool)
            .await?;
        Ok(count > 0)
    }

    fn to_info(&self, user: &User) -> UserInfoOut {
        UserInfoOut {
            id: user.id,
            sn: user.sn,
            avatar: self.urls.to_absolute_url(&user.avatar),
            real_name: user.real_name.clone(),
            nickname: user.nickname.clone(),
            username: user.username.clone(),
            mobile: user.mobile.clone(),
            sex: user.sex,
            channel: user.channel,
            last_login_ip: user.last_login_ip.clone(),
            last_login_time: Timestamp::from_unix(i64::from(user.last_login_time)),
            create_time: Timestamp::from_unix(i64::from(user.create_time)),
        }
    }
}

/// `!` rather than backslash, so the clause reads the same with
/// `NO_BACKSLASH_ESCAPES` on.
const LIKE_ESCAPE: &str = " ESCAPE '!'";

/// Make `%`, `_` and the escape character match literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '!' | '%' | '_') {
            out.push('!');
        }
        out.push(c);
    }
    out
}

fn push_filters(query: &mut QueryBuilder<'_, MySql>, filter: &UserListIn, tz: Tz) {
    query.push(" WHERE is_delete = 0");

    let keyword = filter.keyword.trim();
    if !keyword.is_empty() {
        let like = format!("%{}%", escape_like(keyword));
        query.push(" AND (sn LIKE ").push_bind(like.clone()).push(LIKE_ESCAPE);
        query.push(" OR nickname LIKE ").push_bind(like.clone()).push(LIKE_ESCAPE);
        query.push(" OR username LIKE ").push_bind(like.clone()).push(LIKE_ESCAPE);
        query.push(" OR mobile LIKE ").push_bind(like).push(LIKE_ESCAPE);
        query.push(")");
    }
    if let Some(channel) = filter.channel {
        query.push(" AND channel = ").push_bind(u8::from(channel));
    }
    if let Some(start) = filter.start_time {
        query.push(" AND create_time >= ").push_bind(day_start(start, tz));
    }
    // The end date is inclusive: stop at the start of the following day.
    if let Some(next) = filter.end_time.and_then(|end| end.succ_opt()) {
        query.push(" AND create_time < ").push_bind(day_start(next, tz));
    }
}

/// Unix seconds of local midnight on `date` in `tz`.
pub fn day_start(date: NaiveDate, tz: Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight).timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_start_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(day_start(date, chrono_tz::UTC), 1_704_067_200);
        assert_eq!(day_start(date, chrono_tz::Asia::Shanghai), 1_704_067_200 - 8 * 3600);
    }

    #[test]
    fn filters_render_placeholders() {
        let filter = UserListIn {
            keyword: "zq9x".into(),
            channel: Some(crate::schemas::LoginClientEnum::H5),
            start_time: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_time: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let mut query = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM la_user");
        push_filters(&mut query, &filter, chrono_tz::UTC);
        let sql = query.sql();
        assert!(sql.starts_with(
            "SELECT COUNT(*) FROM la_user WHERE is_delete = 0 AND (sn LIKE ? ESCAPE '!'"
        ));
        assert!(sql.contains("OR mobile LIKE ? ESCAPE '!')"));
        assert!(sql.contains("AND channel = ?"));
        assert!(sql.contains("AND create_time >= ?"));
        assert!(sql.ends_with("AND create_time < ?"));
        assert!(!sql.contains("zq9x"));
    }

    #[test]
    fn like_wildcards_match_literally() {
        assert_eq!(escape_like("50%_off!"), "50!%!_off!!");
        assert_eq!(escape_like("ann"), "ann");
    }

    #[test]
    fn empty_filter_only_hides_deleted() {
        let mut query = QueryBuilder::<MySql>::new("SELECT 1 FROM la_user");
        push_filters(&mut query, &UserListIn::default(), chrono_tz::UTC);
        assert_eq!(query.sql(), "SELECT 1 FROM la_user WHERE is_delete = 0");
    }
}
