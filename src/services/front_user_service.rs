use sqlx::mysql::MySqlDatabaseError;

use crate::database::models::User;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::normalize::Timestamp;
use crate::schemas::front::login::FrontRegisterIn;
use crate::schemas::front::user::{UserCenterOut, UserChangePwdIn, UserEditIn, UserInfoOut};
use crate::services::{hash_password, unix_now, UrlUtil};
use crate::state::AppState;

const FIRST_SN: u32 = 10_000_000;
const REGISTER_ATTEMPTS: u32 = 3;

// MySQL server error numbers
const ER_DUP_ENTRY: u16 = 1062;
const ER_LOCK_DEADLOCK: u16 = 1213;

/// The signed-in user's own account.
pub struct FrontUserService<'a> {
    state: &'a AppState,
    table: String,
    urls: UrlUtil,
}

impl<'a> FrontUserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            table: state.table("user"),
            urls: UrlUtil::new(&state.settings),
        }
    }

    pub async fn center(&self, user_id: u32) -> Result<UserCenterOut, DatabaseError> {
        let user = self.find(user_id).await?;
        Ok(self.to_center(&user))
    }

    pub async fn info(&self, user_id: u32) -> Result<UserInfoOut, DatabaseError> {
        let user = self.find(user_id).await?;
        Ok(UserInfoOut {
            center: self.to_center(&user),
            sex: user.sex,
            is_password: !user.password.is_empty(),
            is_bind_mnp: false,
            version: Some(self.state.settings.version.clone()),
            create_time: Timestamp::from_unix(i64::from(user.create_time)),
        })
    }

    pub async fn edit(&self, user_id: u32, input: &UserEditIn) -> Result<(), ApiError> {
        let user = self.find(user_id).await?;
        let value = input.value.trim();

        let (column, stored) = match input.field.as_str() {
            "avatar" => ("avatar", self.urls.to_relative_url(value)),
            "username" => {
                if value.is_empty() {
                    return Err(ApiError::params_valid("账号不能为空"));
                }
                if self.username_taken(value, user.id).await? {
                    return Err(ApiError::failed("账号已被使用!"));
                }
                ("username", value.to_string())
            }
            "nickname" => {
                if value.is_empty() {
                    return Err(ApiError::params_valid("昵称不能为空"));
                }
                ("nickname", value.to_string())
            }
            "sex" => {
                if !matches!(value, "0" | "1" | "2") {
                    return Err(ApiError::params_valid("性别设置错误"));
                }
                ("sex", value.to_string())
            }
            _ => return Err(ApiError::params_valid("不被支持的类型")),
        };

        let sql = format!("UPDATE {} SET {} = ?, update_time = ? WHERE id = ?", self.table, column);
        sqlx::query(&sql)
            .bind(stored)
            .bind(unix_now())
            .bind(user.id)
            .execute(&self.state.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// Users that already have a password must prove they know it.
    pub async fn change_pwd(&self, user_id: u32, input: &UserChangePwdIn) -> Result<(), ApiError> {
        let user = self.find(user_id).await?;
        let secret = &self.state.settings.secret;

        if !user.password.is_empty() && hash_password(secret, &input.old_password) != user.password {
            return Err(ApiError::failed("原密码不正确!"));
        }

        let sql = format!("UPDATE {} SET password = ?, update_time = ? WHERE id = ?", self.table);
        sqlx::query(&sql)
            .bind(hash_password(secret, &input.password))
            .bind(unix_now())
            .bind(user.id)
            .execute(&self.state.pool)
            .await
            .map_err(DatabaseError::from)?;
        tracing::info!("User {} changed password", user.id);
        Ok(())
    }

    /// Serial allocation and the username check run in one locking
    /// transaction; deadlocks and key collisions between concurrent
    /// registrations are retried.
    pub async fn register(&self, input: &FrontRegisterIn) -> Result<(), ApiError> {
        let mut attempt = 1;
        loop {
            match self.insert_user(input).await {
                Ok(Some(sn)) => {
                    tracing::info!("Registered user {} ({}) from {}", input.username, sn, input.client);
                    return Ok(());
                }
                Ok(None) => return Err(ApiError::failed("账号已存在,换一个吧!")),
                Err(e) if attempt < REGISTER_ATTEMPTS && is_contention(&e) => {
                    tracing::debug!("Register attempt {} for {} collided: {}", attempt, input.username, e);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Serial number of the new user, or `None` when the username is taken.
    async fn insert_user(&self, input: &FrontRegisterIn) -> Result<Option<u32>, DatabaseError> {
        let mut tx = self.state.pool.begin().await?;

        let max_sql = format!("SELECT CAST(MAX(sn) AS UNSIGNED) FROM {} FOR UPDATE", self.table);
        let max_sn: Option<u64> = sqlx::query_scalar(&max_sql).fetch_one(&mut *tx).await?;
        let sn = next_sn(max_sn);

        let taken_sql = format!(
            "SELECT COUNT(*) FROM {} WHERE username = ? AND is_delete = 0 FOR UPDATE",
            self.table
        );
        let taken: i64 = sqlx::query_scalar(&taken_sql)
            .bind(&input.username)
            .fetch_one(&mut *tx)
            .await?;
        if taken > 0 {
            return Ok(None);
        }

        let now = unix_now();
        let sql = format!(
            "INSERT INTO {} (sn, avatar, real_name, nickname, username, password, mobile, sex, \
             channel, is_disable, last_login_ip, last_login_time, is_delete, create_time, update_time, \
             delete_time) VALUES (?, '', '', ?, ?, ?, '', 0, ?, 0, '', 0, 0, ?, ?, 0)",
            self.table
        );
        sqlx::query(&sql)
            .bind(sn)
            .bind(format!("用户{sn}"))
            .bind(&input.username)
            .bind(hash_password(&self.state.settings.secret, &input.password))
            .bind(u8::from(input.client))
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(sn))
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

    async fn username_taken(&self, username: &str, except: u32) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE username = ? AND id <> ? AND is_delete = 0",
            self.table
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(username)
            .bind(except)
            .fetch_one(&self.state.pool)
            .await?;
        Ok(count > 0)
    }

    fn to_center(&self, user: &User) -> UserCenterOut {
        UserCenterOut {
            id: user.id,
            sn: user.sn,
            avatar: self.urls.to_absolute_url(&user.avatar),
            real_name: user.real_name.clone(),
            nickname: user.nickname.clone(),
            username: user.username.clone(),
            mobile: user.mobile.clone(),
        }
    }
}

fn next_sn(max_sn: Option<u64>) -> u32 {
    max_sn
        .and_then(|sn| u32::try_from(sn).ok())
        .map_or(FIRST_SN, |sn| sn.max(FIRST_SN - 1) + 1)
}

/// Errors a concurrent registration can cause that a fresh attempt resolves.
fn is_contention(err: &DatabaseError) -> bool {
    let DatabaseError::Sqlx(sqlx::Error::Database(db)) = err else {
        return false;
    };
    db.try_downcast_ref::<MySqlDatabaseError>()
        .is_some_and(|e| matches!(e.number(), ER_DUP_ENTRY | ER_LOCK_DEADLOCK))
}
