use std::rc::Rc;

use overseas_board_shared::{
    board::{reduce, BoardEvent, BoardState},
    LikeStateCache, LikeStatus,
};
use yew::prelude::*;

/// Yew adapter over the shared board reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardStore(pub BoardState);

impl Reducible for BoardStore {
    type Action = BoardEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(BoardStore(reduce(self.0.clone(), action)))
    }
}

/// Like cache of a post list page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikeStore(pub LikeStateCache);

pub enum LikeAction {
    /// A list load replaced every entry.
    Loaded(LikeStateCache),
    /// The backend answered a toggle; only this post's entry changes, so
    /// toggles on other posts still in flight are kept.
    Confirmed { post_id: i64, status: LikeStatus },
}

impl Reducible for LikeStore {
    type Action = LikeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            LikeAction::Loaded(cache) => Rc::new(LikeStore(cache)),
            LikeAction::Confirmed {
                post_id,
                status,
            } => {
                let mut cache = self.0.clone();
                cache.record(post_id, status);
                Rc::new(LikeStore(cache))
            },
        }
    }
}
