use super::common::*;
use super::possible_actions::*;
use crate::error::{Error, Res};
use crate::listener::Listener;
use crate::model::*;

// [TurnEngine]
// RoundStateの状態遷移
// すべての遷移は検証を行ってから状態を変更する (不正な操作の場合は状態を変更しない)
impl RoundState {
    // 操作を適用して発生したイベントの一覧を返却
    // 鳴きの応答を受け付けただけの場合(他家の応答待ち)は空のリスト
    pub fn apply(&mut self, seat: Seat, action: Action) -> Res<Vec<Event>> {
        if seat >= SEAT {
            return Err(Error::IllegalAction(format!("invalid seat: {}", seat)));
        }

        let res = match action {
            Action::Draw => self.do_draw(seat),
            Action::Discard(t) => self.do_discard(seat, t, false),
            Action::Riichi(t) => self.do_discard(seat, t, true),
            Action::Ankan(t) => self.do_ankan(seat, t),
            Action::Kakan(t) => self.do_kakan(seat, t),
            Action::Kyushukyuhai => self.do_kyushukyuhai(seat),
            Action::Claim(tp, ref consumed) => self.do_claim(seat, tp, consumed),
            Action::Pass => self.do_pass(seat),
            Action::DeclareWin => self.do_declare_win(seat),
        };

        match &res {
            Ok(events) => {
                self.step += 1;
                self.assert_tile_count();
                for e in events {
                    debug!("(step:{}) {}", self.step, e);
                }
                if let Phase::RoundEnded(reason) = &self.phase {
                    if !events.is_empty() {
                        info!("round ended: {:?}", reason);
                    }
                }
            }
            Err(e) => {
                debug!("rejected: seat {} {}: {}", seat, action, e);
            }
        }
        res
    }

    // applyの後に各リスナーへイベントを通知
    pub fn apply_with(
        &mut self,
        seat: Seat,
        action: Action,
        listeners: &mut [Box<dyn Listener>],
    ) -> Res<Vec<Event>> {
        let events = self.apply(seat, action)?;
        for e in &events {
            for l in listeners.iter_mut() {
                l.notify_event(self, e);
            }
        }
        Ok(events)
    }

    // 応答していないプレイヤーをすべてスキップとみなして鳴きを確定
    // (応答の締め切りは呼び出し側が管理する)
    pub fn resolve_calls(&mut self) -> Res<Vec<Event>> {
        if !matches!(self.phase, Phase::AwaitingCalls { .. }) {
            return Err(Error::IllegalAction(format!(
                "not awaiting calls: {:?}",
                self.phase
            )));
        }
        let events = self.resolve();
        self.step += 1;
        self.assert_tile_count();
        Ok(events)
    }

    #[inline]
    pub fn legal_actions(&self, seat: Seat) -> Vec<Action> {
        legal_actions(self, seat)
    }

    // 牌の総数の検証 (失敗した場合はエンジンのバグ)
    fn assert_tile_count(&self) {
        let n = self.tile_count();
        if n != TILE_COUNT {
            error!("tile count mismatch: {}\n{}", n, self);
        }
        assert!(n == TILE_COUNT);
    }

    fn expect_turn(&self, seat: Seat, draw: bool) -> Res {
        let ok = match self.phase {
            Phase::AwaitingDraw(s) => draw && s == seat,
            Phase::AwaitingDiscard(s) => !draw && s == seat,
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::IllegalAction(format!(
                "seat {} cannot act in {:?}",
                seat, self.phase
            )))
        }
    }

    fn do_draw(&mut self, seat: Seat) -> Res<Vec<Event>> {
        self.expect_turn(seat, true)?;

        let t = match self.draw_pile.pop_front() {
            Some(t) => t,
            None => {
                // 荒牌平局
                let tenpai = [0, 1, 2, 3].map(|s| is_tenpai(&self.players[s].hand));
                let nagashi = [0, 1, 2, 3].map(|s| is_nagashimangan(&self.players[s]));
                self.phase = Phase::RoundEnded(EndReason::ExhaustiveDraw { tenpai, nagashi });
                return Ok(vec![Event::draw(DrawType::Kouhaiheikyoku, tenpai, nagashi)]);
            }
        };

        let pl = &mut self.players[seat];
        pl.hand.insert(t);
        pl.drawn = Some(t);
        self.phase = Phase::AwaitingDiscard(seat);
        Ok(vec![Event::deal(seat, t, false)])
    }

    fn do_discard(&mut self, seat: Seat, t: TileId, is_riichi: bool) -> Res<Vec<Event>> {
        self.expect_turn(seat, false)?;

        let pl = &self.players[seat];
        if !pl.hand.contains(t) {
            return Err(Error::IllegalDiscard(format!("{} is not in hand", t)));
        }
        // リーチ後はツモ牌と同種の牌のみ (待ちは変わらない)
        if pl.is_riichi && pl.drawn.map(|d| d.kind()) != Some(t.kind()) {
            return Err(Error::IllegalDiscard(format!(
                "only the drawn tile can be discarded after riichi: {}",
                t
            )));
        }
        if pl.restricted.contains(&t.kind()) {
            return Err(Error::IllegalDiscard(format!(
                "{} cannot be discarded right after the call",
                t
            )));
        }
        if is_riichi && !can_riichi(self, seat, t) {
            return Err(Error::IllegalDeclare(format!("cannot declare riichi with {}", t)));
        }

        let is_daburii = is_riichi && is_no_meld_turn1(self, seat);
        let pl = &mut self.players[seat];
        let is_drawn = pl.drawn == Some(t);
        pl.hand.remove(t);
        pl.discards.push(Discard {
            tile: t,
            is_drawn,
            is_riichi,
            claimed: false,
        });
        pl.drawn = None;
        pl.restricted.clear();
        pl.is_rinshan = false;
        pl.is_furiten_other = false;
        if is_riichi {
            pl.is_riichi = true;
            pl.is_daburii = is_daburii;
            pl.is_ippatsu = true;
        } else {
            pl.is_ippatsu = false;
        }

        // 北家の打牌で一巡目が終了
        if seat == SEAT - 1 {
            self.is_first_go_around = false;
        }

        let mut events = vec![Event::discard(seat, t, is_drawn, is_riichi)];
        events.append(&mut self.open_calls(t, seat, CallWindow::Discard));
        Ok(events)
    }

    fn do_ankan(&mut self, seat: Seat, t: Tile) -> Res<Vec<Event>> {
        self.expect_turn(seat, false)?;
        if !legal_actions(self, seat).contains(&Action::Ankan(t)) {
            return Err(Error::IllegalClaim(format!("ankan {} is not allowed", t)));
        }

        let pl = &mut self.players[seat];
        let ids = pl.hand.find_kind(t, TILE);
        for &id in &ids {
            pl.hand.remove(id);
        }
        pl.hand
            .melds
            .push(Meld::new(MeldType::Ankan, ids.clone(), None, None));
        pl.drawn = None;
        self.is_first_go_around = false;
        self.clear_ippatsu();

        let mut events = vec![Event::meld(seat, MeldType::Ankan, ids, None)];
        events.append(&mut self.draw_kan_tile(seat)?);
        Ok(events)
    }

    fn do_kakan(&mut self, seat: Seat, t: TileId) -> Res<Vec<Event>> {
        self.expect_turn(seat, false)?;
        if !legal_actions(self, seat).contains(&Action::Kakan(t)) {
            return Err(Error::IllegalClaim(format!("kakan {} is not allowed", t)));
        }

        // 牌は槍槓の受付が終わるまで手牌に残す
        let mut events = vec![Event::meld(seat, MeldType::Kakan, vec![t], None)];
        events.append(&mut self.open_calls(t, seat, CallWindow::Kakan));
        Ok(events)
    }

    fn do_kyushukyuhai(&mut self, seat: Seat) -> Res<Vec<Event>> {
        self.expect_turn(seat, false)?;
        if !legal_actions(self, seat).contains(&Action::Kyushukyuhai) {
            return Err(Error::IllegalDeclare(
                "kyushukyuhai is not allowed".to_string(),
            ));
        }

        self.phase = Phase::RoundEnded(EndReason::Abortive(DrawType::Kyushukyuhai));
        Ok(vec![Event::draw(
            DrawType::Kyushukyuhai,
            [false; SEAT],
            [false; SEAT],
        )])
    }

    fn do_declare_win(&mut self, seat: Seat) -> Res<Vec<Event>> {
        match self.phase {
            Phase::AwaitingDiscard(s) if s == seat => {
                let ctx = evaluate_tsumo(self, seat)?;
                let ura_doras = revealed_ura_doras(self, seat);
                let event = Event::win(seat, seat, ctx.clone(), ura_doras);
                self.phase = Phase::RoundEnded(EndReason::Tsumo { seat, context: ctx });
                Ok(vec![event])
            }
            Phase::AwaitingCalls { tile, window, .. } => {
                self.expect_call(seat)?;
                let ctx = evaluate_ron(self, seat, tile, window)?;
                self.respond(seat, Response::Ron(ctx));
                Ok(self.resolve_if_ready())
            }
            _ => Err(Error::IllegalAction(format!(
                "seat {} cannot declare win in {:?}",
                seat, self.phase
            ))),
        }
    }

    fn do_claim(&mut self, seat: Seat, tp: CallType, consumed: &[TileId]) -> Res<Vec<Event>> {
        let (tile, discarder, window) = self.expect_call(seat)?;
        check_claim(self, seat, tile, discarder, window, tp, consumed)?;

        let mut consumed = consumed.to_vec();
        consumed.sort();
        self.respond(seat, Response::Call(tp, consumed));
        Ok(self.resolve_if_ready())
    }

    fn do_pass(&mut self, seat: Seat) -> Res<Vec<Event>> {
        self.expect_call(seat)?;
        self.respond(seat, Response::Pass);
        Ok(self.resolve_if_ready())
    }

    // 鳴きの受付中であれば (打牌, 打牌者, 受付の種類) を返却
    fn expect_call(&self, seat: Seat) -> Res<(TileId, Seat, CallWindow)> {
        match self.phase {
            Phase::AwaitingCalls {
                tile,
                discarder,
                window,
            } if discarder != seat => {
                if self.responses[seat].is_some() {
                    Err(Error::IllegalClaim(format!(
                        "seat {} has already responded",
                        seat
                    )))
                } else {
                    Ok((tile, discarder, window))
                }
            }
            _ => Err(Error::IllegalAction(format!(
                "seat {} cannot call in {:?}",
                seat, self.phase
            ))),
        }
    }

    #[inline]
    fn respond(&mut self, seat: Seat, r: Response) {
        self.responses[seat] = Some(r);
    }

    // 鳴きの受付を開始
    // 可能な操作がスキップのみのプレイヤーは自動的にスキップ
    fn open_calls(&mut self, tile: TileId, discarder: Seat, window: CallWindow) -> Vec<Event> {
        self.phase = Phase::AwaitingCalls {
            tile,
            discarder,
            window,
        };
        self.responses = Default::default();
        self.responses[discarder] = Some(Response::Pass);
        for s in 0..SEAT {
            if s != discarder && calc_possible_call_actions(self, s, tile, discarder, window).len() == 1 {
                self.responses[s] = Some(Response::Pass);
            }
        }
        self.resolve_if_ready()
    }

    // 全員が応答済み, またはロンが確定した場合に鳴きを処理
    fn resolve_if_ready(&mut self) -> Vec<Event> {
        if self.responses.iter().all(|r| r.is_some()) {
            return self.resolve();
        }

        // 未応答のプレイヤーにロンの可能性がなければ待たずに確定
        let has_ron = self
            .responses
            .iter()
            .any(|r| matches!(r, Some(Response::Ron(_))));
        if has_ron {
            let pending_ron = (0..SEAT).any(|s| {
                self.responses[s].is_none()
                    && legal_actions(self, s).contains(&Action::DeclareWin)
            });
            if !pending_ron {
                return self.resolve();
            }
        }
        vec![]
    }

    // 優先順位の最も高い応答を選択 (同順位の場合は打牌者の下家から近い順)
    fn resolve(&mut self) -> Vec<Event> {
        let (tile, discarder, window) = match self.phase {
            Phase::AwaitingCalls {
                tile,
                discarder,
                window,
            } => (tile, discarder, window),
            _ => return vec![],
        };

        let responses = std::mem::take(&mut self.responses);
        let mut best: Option<(Seat, Response)> = None;
        for i in 1..SEAT {
            let s = (discarder + i) % SEAT;
            let r = responses[s].clone().unwrap_or(Response::Pass);
            let p = r.priority();
            if p > 0 && best.as_ref().map_or(true, |(_, b)| p > b.priority()) {
                best = Some((s, r));
            }
        }

        // 和了牌の見逃し
        for s in 0..SEAT {
            if s == discarder || matches!(best, Some((w, Response::Ron(_))) if w == s) {
                continue;
            }
            let pl = &mut self.players[s];
            if calc_waits(&pl.hand).contains(&tile.kind()) {
                pl.is_furiten_other = true;
                if pl.is_riichi {
                    pl.is_furiten_riichi = true;
                }
            }
        }

        match best {
            Some((seat, Response::Ron(ctx))) => {
                let ura_doras = revealed_ura_doras(self, seat);
                let event = Event::win(seat, discarder, ctx.clone(), ura_doras);
                self.phase = Phase::RoundEnded(EndReason::Ron {
                    seat,
                    from: discarder,
                    context: ctx,
                });
                vec![event]
            }
            Some((seat, Response::Call(tp, consumed))) => self.claim(seat, tp, consumed, tile, discarder),
            _ => match window {
                CallWindow::Discard => {
                    self.phase = Phase::AwaitingDraw((discarder + 1) % SEAT);
                    vec![]
                }
                CallWindow::Kakan => self.complete_kakan(discarder, tile),
            },
        }
    }

    fn claim(
        &mut self,
        seat: Seat,
        tp: CallType,
        consumed: Vec<TileId>,
        tile: TileId,
        discarder: Seat,
    ) -> Vec<Event> {
        if let Some(d) = self.players[discarder].discards.last_mut() {
            d.claimed = true;
        }

        let meld_type = match tp {
            CallType::Chi => MeldType::Chi,
            CallType::Pon => MeldType::Pon,
            CallType::Kan => MeldType::Minkan,
        };
        let restricted = calc_prohibited_discards(tp, tile.kind(), &consumed);

        let pl = &mut self.players[seat];
        for &id in &consumed {
            pl.hand.remove(id);
        }
        let mut tiles = consumed.clone();
        tiles.push(tile);
        pl.hand
            .melds
            .push(Meld::new(meld_type, tiles, Some(tile), Some(discarder)));
        pl.drawn = None;
        if tp != CallType::Kan {
            pl.restricted = restricted;
        }

        self.is_first_go_around = false;
        self.clear_ippatsu();
        self.phase = Phase::AwaitingDiscard(seat);

        let mut events = vec![Event::meld(seat, meld_type, consumed, Some(discarder))];
        if tp == CallType::Kan {
            match self.draw_kan_tile(seat) {
                Ok(mut evs) => events.append(&mut evs),
                Err(e) => error!("minkan without replacement tile: {}", e),
            }
        }
        events
    }

    fn complete_kakan(&mut self, seat: Seat, tile: TileId) -> Vec<Event> {
        let pl = &mut self.players[seat];
        pl.hand.remove(tile);
        if let Some(m) = pl
            .hand
            .melds
            .iter_mut()
            .find(|m| m.meld_type == MeldType::Pon && m.kind() == tile.kind())
        {
            let mut tiles = m.tiles.clone();
            tiles.push(tile);
            *m = Meld::new(MeldType::Kakan, tiles, m.claimed, m.from);
        }
        pl.drawn = None;
        self.clear_ippatsu();
        self.phase = Phase::AwaitingDiscard(seat);

        match self.draw_kan_tile(seat) {
            Ok(events) => events,
            Err(e) => {
                error!("kakan without replacement tile: {}", e);
                vec![]
            }
        }
    }

    // 嶺上牌のツモと新ドラの公開
    // 嶺上牌を取り出した分はツモ山の末尾から王牌に補充
    fn draw_kan_tile(&mut self, seat: Seat) -> Res<Vec<Event>> {
        if self.dead_wall.replacement_left() == 0 {
            return Err(Error::WallExhausted);
        }
        let supplement = self.draw_pile.pop_back();
        let t = self
            .dead_wall
            .draw_replacement(supplement)
            .ok_or(Error::WallExhausted)?;
        self.kan_count += 1;

        let mut events = vec![];
        if self.n_dora < INDICATOR_SIZE {
            self.n_dora += 1;
            events.push(Event::dora(self.dead_wall.dora_indicator(self.n_dora - 1)));
        }

        let pl = &mut self.players[seat];
        pl.hand.insert(t);
        pl.drawn = Some(t);
        pl.is_rinshan = true;
        self.phase = Phase::AwaitingDiscard(seat);
        events.push(Event::deal(seat, t, true));
        Ok(events)
    }

    fn clear_ippatsu(&mut self) {
        for pl in &mut self.players {
            pl.is_ippatsu = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{create_wall_debug, deal, deal_with_wall, tiles_from_string};

    fn setup(hands: [&str; SEAT], draws: &str) -> RoundState {
        setup_with_dead_wall(hands, draws, "", "")
    }

    fn setup_with_dead_wall(hands: [&str; SEAT], draws: &str, rep: &str, doras: &str) -> RoundState {
        let wall = create_wall_debug(0, hands, draws, rep, doras, "").unwrap();
        deal_with_wall(&wall, 0, Rule::default()).unwrap()
    }

    // 手牌から指定した種類の牌のIDを取得
    fn id(stg: &RoundState, seat: Seat, s: &str) -> TileId {
        let t = tiles_from_string(s).unwrap()[0];
        stg.players[seat].hand.find_kind(t, 1)[0]
    }

    // 鳴きの受付中なら残りをスキップとして確定
    fn settle(stg: &mut RoundState) {
        if matches!(stg.phase, Phase::AwaitingCalls { .. }) {
            stg.resolve_calls().unwrap();
        }
    }

    // ツモ切り
    fn tsumogiri(stg: &mut RoundState, seat: Seat) {
        stg.apply(seat, Action::Draw).unwrap();
        let d = stg.players[seat].drawn.unwrap();
        stg.apply(seat, Action::Discard(d)).unwrap();
        settle(stg);
    }

    #[test]
    fn test_illegal_action_leaves_state_unchanged() {
        let mut stg = deal(3, [4, 4]).unwrap();
        let before = stg.snapshot();
        assert!(matches!(
            stg.apply(1, Action::Draw),
            Err(Error::IllegalAction(_))
        ));
        assert_eq!(stg, before);

        stg.apply(0, Action::Draw).unwrap();
        let before = stg.snapshot();
        let other = stg.players[1].hand.concealed[0];
        assert!(matches!(
            stg.apply(0, Action::Discard(other)),
            Err(Error::IllegalDiscard(_))
        ));
        assert_eq!(stg, before);

        assert!(stg.apply(0, Action::DeclareWin).is_err());
        assert!(stg.apply(2, Action::Pass).is_err());
        assert_eq!(stg, before);
    }

    #[test]
    fn test_ron_priority_closest_seat() {
        let hands = [
            "m111999s111999z1",
            "m234567p234567s5",
            "m234567p234567s5",
            "z2223334445556",
        ];
        let mut stg = setup(hands, "s5");
        stg.apply(0, Action::Draw).unwrap();
        let t = stg.players[0].drawn.unwrap();
        let events = stg.apply(0, Action::Discard(t)).unwrap();
        assert_eq!(events.len(), 1);

        // 北家は鳴けないので自動的にスキップ
        assert_eq!(stg.responses[3], Some(Response::Pass));
        assert!(stg.legal_actions(1).contains(&Action::DeclareWin));
        assert!(stg.legal_actions(2).contains(&Action::DeclareWin));
        let waiting = stg.snapshot();

        // 対面が先に宣言しても下家を待つ
        assert!(stg.apply(2, Action::DeclareWin).unwrap().is_empty());
        let events = stg.apply(1, Action::DeclareWin).unwrap();
        assert!(matches!(&events[0], Event::Win(e) if e.seat == 1 && e.from == 0));
        assert!(matches!(
            stg.phase,
            Phase::RoundEnded(EndReason::Ron { seat: 1, from: 0, .. })
        ));
        assert!(stg.apply(2, Action::Pass).is_err());
        // 自分の最初のツモ前のロンは人和
        if let Phase::RoundEnded(EndReason::Ron { context, .. }) = &stg.phase {
            assert!(context.has(Yaku::Renhou));
            assert_eq!(context.yakuman, 1);
        }

        // 下家がスキップすれば対面の和了
        let mut stg = waiting;
        stg.apply(2, Action::DeclareWin).unwrap();
        stg.apply(1, Action::Pass).unwrap();
        assert!(matches!(
            stg.phase,
            Phase::RoundEnded(EndReason::Ron { seat: 2, from: 0, .. })
        ));
    }

    #[test]
    fn test_ron_beats_pon() {
        let hands = [
            "s111999z1112223",
            "m234567p234567z4",
            "m123789p111s55z77",
            "m234567p234567s5",
        ];
        let mut stg = setup(hands, "s0");
        stg.apply(0, Action::Draw).unwrap();
        let t = stg.players[0].drawn.unwrap();
        assert!(t.is_red5());
        stg.apply(0, Action::Discard(t)).unwrap();
        assert_eq!(stg.responses[1], Some(Response::Pass));

        let pon = Action::pon(stg.players[2].hand.find_kind(Tile(TS, 5), 2));
        assert!(stg.legal_actions(2).contains(&pon));
        // チーは下家のみ
        assert!(matches!(
            stg.apply(2, Action::chi(stg.players[2].hand.find_kind(Tile(TS, 5), 2))),
            Err(Error::IllegalClaim(_))
        ));
        assert!(stg.apply(2, pon).unwrap().is_empty());
        let waiting = stg.snapshot();

        stg.apply(3, Action::DeclareWin).unwrap();
        assert!(matches!(
            stg.phase,
            Phase::RoundEnded(EndReason::Ron { seat: 3, from: 0, .. })
        ));
        assert!(stg.players[2].hand.melds.is_empty());

        // ロンを見逃せばポンが成立し, 見逃した側は同巡内フリテン
        let mut stg = waiting;
        let events = stg.apply(3, Action::Pass).unwrap();
        assert!(matches!(&events[0], Event::Meld(e) if e.seat == 2 && e.from == Some(0)));
        assert_eq!(stg.phase, Phase::AwaitingDiscard(2));
        let pl = &stg.players[2];
        assert_eq!(pl.hand.melds[0].meld_type, MeldType::Pon);
        assert_eq!(pl.hand.melds[0].claimed, Some(t));
        assert_eq!(pl.restricted, vec![Tile(TS, 5)]);
        assert!(stg.players[0].discards[0].claimed);
        assert!(stg.players[3].is_furiten_other);
        assert!(!stg.is_first_go_around);

        // ポンの直後はツモ和了, 槓, リーチ不可
        let acts = stg.legal_actions(2);
        assert!(acts.iter().all(|a| matches!(a, Action::Discard(_))));
        assert_eq!(acts.len(), 11);
    }

    #[test]
    fn test_exhaustive_draw() {
        let mut stg = deal(11, [1, 6]).unwrap();
        let mut n_deal = 0;
        while !stg.is_ended() {
            match stg.phase {
                Phase::AwaitingDraw(s) => {
                    let events = stg.apply(s, Action::Draw).unwrap();
                    if matches!(events[0], Event::Deal(_)) {
                        n_deal += 1;
                    }
                }
                Phase::AwaitingDiscard(s) => {
                    let d = stg.players[s].drawn.unwrap();
                    stg.apply(s, Action::Discard(d)).unwrap();
                }
                Phase::AwaitingCalls { .. } => {
                    stg.resolve_calls().unwrap();
                }
                Phase::RoundEnded(_) => {}
            }
        }
        assert_eq!(n_deal, LIVE_WALL_SIZE);
        assert!(stg.draw_pile.is_empty());
        assert!(matches!(
            stg.phase,
            Phase::RoundEnded(EndReason::ExhaustiveDraw { .. })
        ));
        assert_eq!(stg.tile_count(), TILE_COUNT);
        assert!(stg.legal_actions(0).is_empty());
    }

    #[test]
    fn test_ankan_reveals_dora() {
        let hands = ["m111p123456s1234", "", "", ""];
        let mut stg = setup_with_dead_wall(hands, "m1", "z7", "z1z2");
        stg.apply(0, Action::Draw).unwrap();
        assert!(stg.legal_actions(0).contains(&Action::Ankan(Tile(TM, 1))));
        assert!(stg.apply(0, Action::Ankan(Tile(TP, 1))).is_err());

        let events = stg.apply(0, Action::Ankan(Tile(TM, 1))).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[1], Event::Dora(e) if e.tile.kind() == Tile(TZ, 2)));
        assert!(matches!(&events[2], Event::Deal(e) if e.is_replacement && e.tile.kind() == Tile(TZ, 7)));

        assert_eq!(stg.phase, Phase::AwaitingDiscard(0));
        assert_eq!(stg.n_dora, 2);
        assert_eq!(stg.kan_count, 1);
        assert_eq!(stg.dead_wall.len(), DEAD_WALL_SIZE);
        assert_eq!(stg.wall_count(), LIVE_WALL_SIZE - 2);
        let pl = &stg.players[0];
        assert_eq!(pl.hand.melds[0].meld_type, MeldType::Ankan);
        assert!(pl.hand.is_menzen());
        assert!(pl.is_rinshan);
        assert_eq!(pl.hand.size(), 14);
    }

    #[test]
    fn test_riichi_and_tsumo() {
        let hands = ["m123456789p11s45", "", "", ""];
        let mut stg = setup(hands, "z1z2z3z4s6");
        stg.apply(0, Action::Draw).unwrap();

        let before = stg.snapshot();
        let p1 = id(&stg, 0, "p1");
        assert!(matches!(
            stg.apply(0, Action::Riichi(p1)),
            Err(Error::IllegalDeclare(_))
        ));
        assert_eq!(stg, before);

        let z1 = stg.players[0].drawn.unwrap();
        assert!(stg.legal_actions(0).contains(&Action::Riichi(z1)));
        stg.apply(0, Action::Riichi(z1)).unwrap();
        settle(&mut stg);
        let pl = &stg.players[0];
        assert!(pl.is_riichi && pl.is_daburii && pl.is_ippatsu);
        assert!(pl.discards[0].is_riichi);

        for s in 1..SEAT {
            tsumogiri(&mut stg, s);
        }

        stg.apply(0, Action::Draw).unwrap();
        // リーチ後はツモ牌以外を捨てられない
        let m1 = id(&stg, 0, "m1");
        assert!(matches!(
            stg.apply(0, Action::Discard(m1)),
            Err(Error::IllegalDiscard(_))
        ));
        assert!(stg.legal_actions(0).contains(&Action::DeclareWin));

        // 宣言しなければツモ和了は成立しない
        let mut declined = stg.snapshot();
        let s6 = declined.players[0].drawn.unwrap();
        declined.apply(0, Action::Discard(s6)).unwrap();
        assert!(!declined.is_ended());

        let events = stg.apply(0, Action::DeclareWin).unwrap();
        let ctx = match &stg.phase {
            Phase::RoundEnded(EndReason::Tsumo { seat: 0, context }) => context.clone(),
            p => panic!("unexpected phase: {:?}", p),
        };
        for y in [
            Yaku::DaburuRiichi,
            Yaku::Ippatsu,
            Yaku::MenzenTsumo,
            Yaku::Pinfu,
            Yaku::Ikkitsuukan,
        ] {
            assert!(ctx.has(y), "{:?}", y);
        }
        assert!(!ctx.has(Yaku::Riichi));
        assert!(matches!(&events[0], Event::Win(e) if e.ura_doras.len() == 1));
    }

    #[test]
    fn test_chankan() {
        let hands = [
            "m111999s111999z5",
            "m888p111222333z6",
            "m22233345p99s777",
            "m234567s234p78s55",
        ];
        let mut stg = setup(hands, "p9z1z2z3p9");

        // 親の打牌p9を西家がポン (北家はロンを見逃し)
        stg.apply(0, Action::Draw).unwrap();
        let p9 = stg.players[0].drawn.unwrap();
        stg.apply(0, Action::Discard(p9)).unwrap();
        assert!(stg.legal_actions(3).contains(&Action::DeclareWin));
        let pon = Action::pon(stg.players[2].hand.find_kind(Tile(TP, 9), 2));
        stg.apply(2, pon).unwrap();
        stg.apply(3, Action::Pass).unwrap();
        assert_eq!(stg.phase, Phase::AwaitingDiscard(2));
        assert!(stg.players[3].is_furiten_other);

        let s7 = id(&stg, 2, "s7");
        stg.apply(2, Action::Discard(s7)).unwrap();
        settle(&mut stg);
        tsumogiri(&mut stg, 3);
        assert!(!stg.players[3].is_furiten_other);
        tsumogiri(&mut stg, 0);
        tsumogiri(&mut stg, 1);

        stg.apply(2, Action::Draw).unwrap();
        let p9 = stg.players[2].drawn.unwrap();
        assert!(stg.legal_actions(2).contains(&Action::Kakan(p9)));
        let events = stg.apply(2, Action::Kakan(p9)).unwrap();
        assert!(matches!(&events[0], Event::Meld(e) if e.meld_type == MeldType::Kakan));
        assert!(matches!(
            stg.phase,
            Phase::AwaitingCalls {
                window: CallWindow::Kakan,
                ..
            }
        ));
        // 加槓に対してはロンのみ
        assert_eq!(stg.legal_actions(3), vec![Action::Pass, Action::DeclareWin]);
        let waiting = stg.snapshot();

        stg.apply(3, Action::DeclareWin).unwrap();
        let ctx = match &stg.phase {
            Phase::RoundEnded(EndReason::Ron {
                seat: 3,
                from: 2,
                context,
            }) => context.clone(),
            p => panic!("unexpected phase: {:?}", p),
        };
        assert!(ctx.has(Yaku::Chankan));
        assert!(!ctx.has(Yaku::Renhou));
        assert_eq!(ctx.winning_tile, p9);

        // 槍槓がなければ加槓が成立して嶺上牌をツモ
        let mut stg = waiting;
        let events = stg.apply(3, Action::Pass).unwrap();
        assert!(matches!(&events[0], Event::Dora(_)));
        assert!(matches!(&events[1], Event::Deal(e) if e.seat == 2 && e.is_replacement));
        let pl = &stg.players[2];
        assert_eq!(pl.hand.melds[0].meld_type, MeldType::Kakan);
        assert_eq!(pl.hand.melds[0].tiles.len(), 4);
        assert!(!pl.hand.contains(p9));
        assert_eq!(stg.phase, Phase::AwaitingDiscard(2));
        assert_eq!(stg.n_dora, 2);
    }

    #[test]
    fn test_kyushukyuhai() {
        let hands = ["m19p19s19z12345m55", "", "", ""];
        let mut stg = setup(hands, "m6");
        stg.apply(0, Action::Draw).unwrap();
        assert!(stg.legal_actions(0).contains(&Action::Kyushukyuhai));
        let events = stg.apply(0, Action::Kyushukyuhai).unwrap();
        assert!(matches!(&events[0], Event::Draw(e) if e.draw_type == DrawType::Kyushukyuhai));
        assert_eq!(
            stg.phase,
            Phase::RoundEnded(EndReason::Abortive(DrawType::Kyushukyuhai))
        );
    }

    #[test]
    fn test_furiten_blocks_ron() {
        let hands = [
            "m111999s111999z1",
            "z2223334445556",
            "m234567p234567s5",
            "z111777666p99s22",
        ];
        let mut stg = setup(hands, "s5s5");
        stg.apply(0, Action::Draw).unwrap();
        let t = stg.players[0].drawn.unwrap();
        stg.apply(0, Action::Discard(t)).unwrap();
        assert_eq!(stg.legal_actions(2), vec![Action::Pass, Action::DeclareWin]);

        // 見逃し後は自分が打牌するまでロンできない
        stg.apply(2, Action::Pass).unwrap();
        assert_eq!(stg.phase, Phase::AwaitingDraw(1));
        assert!(stg.players[2].is_furiten_other);

        stg.apply(1, Action::Draw).unwrap();
        let t = stg.players[1].drawn.unwrap();
        stg.apply(1, Action::Discard(t)).unwrap();
        assert_eq!(stg.phase, Phase::AwaitingDraw(2));
        assert!(stg.apply(2, Action::DeclareWin).is_err());

        tsumogiri(&mut stg, 2);
        assert!(!stg.players[2].is_furiten_other);
    }

    #[test]
    fn test_pon_with_any_copies() {
        let hands = [
            "m111999p111999z1",
            "m234567p234567z2",
            "s555m234p234z3344",
            "z55566677711z22",
        ];
        // 親の赤5索に対して手牌の通常の5索のうち任意の2枚でポン
        let mut stg = setup(hands, "s0");
        stg.apply(0, Action::Draw).unwrap();
        let red = stg.players[0].drawn.unwrap();
        assert_eq!(red.id(), 80);
        stg.apply(0, Action::Discard(red)).unwrap();

        let ids: Vec<TileId> = [82, 83].iter().map(|&i| TileId::new(i).unwrap()).collect();
        assert!(!stg.legal_actions(2).contains(&Action::pon(ids.clone())));
        let events = stg.apply(2, Action::pon(ids.clone())).unwrap();
        assert!(matches!(&events[0], Event::Meld(e) if e.meld_type == MeldType::Pon && e.consumed == ids));

        let pl = &stg.players[2];
        assert_eq!(pl.hand.melds[0].tiles.len(), 3);
        assert!(pl.hand.melds[0].tiles.contains(&red));
        assert!(pl.hand.contains(TileId::new(81).unwrap()));
        assert_eq!(stg.phase, Phase::AwaitingDiscard(2));
    }

    #[test]
    fn test_invalid_claims() {
        let hands = [
            "m111999p111999z1",
            "m234567p234567z2",
            "s555m234p234z3344",
            "z55566677711z22",
        ];
        let mut stg = setup(hands, "s0");
        stg.apply(0, Action::Draw).unwrap();
        let red = stg.players[0].drawn.unwrap();
        stg.apply(0, Action::Discard(red)).unwrap();
        let before = stg.snapshot();

        let id = |i: usize| TileId::new(i).unwrap();
        // 同じ牌の重複指定, 手牌にない牌, 枚数不足
        for consumed in [vec![id(82), id(82)], vec![id(81), id(80)], vec![id(81)]] {
            assert!(matches!(
                stg.apply(2, Action::Claim(CallType::Pon, consumed)),
                Err(Error::IllegalClaim(_))
            ));
        }
        // 種類の違う牌, 下家以外のチー
        let m2 = stg.players[2].hand.find_kind(Tile(TM, 2), 1)[0];
        assert!(stg.apply(2, Action::pon(vec![id(81), m2])).is_err());
        assert!(stg.apply(2, Action::chi(vec![id(81), id(82)])).is_err());
        assert_eq!(stg, before);

        // 3枚の任意の組み合わせで大明槓
        assert!(stg.apply(2, Action::kan(vec![id(83), id(81), id(82)])).is_ok());
        assert_eq!(stg.players[2].hand.melds[0].meld_type, MeldType::Minkan);
    }

    #[test]
    fn test_chi_with_any_copies() {
        let hands = [
            "m111999p111999z3",
            "m2344p123s123z112",
            "p456789s456789z5",
            "p22s33z66677744z5",
        ];
        let mut stg = setup(hands, "m5");
        stg.apply(0, Action::Draw).unwrap();
        let m5 = stg.players[0].drawn.unwrap();
        stg.apply(0, Action::Discard(m5)).unwrap();

        // 2枚目の4萬を指定したチー
        let m3 = id(&stg, 1, "m3");
        let m4 = stg.players[1].hand.find_kind(Tile(TM, 4), 2);
        assert_eq!(m4.len(), 2);
        let chi = Action::chi(vec![m3, m4[1]]);
        assert!(!stg.legal_actions(1).contains(&chi));
        let events = stg.apply(1, chi).unwrap();
        assert!(matches!(&events[0], Event::Meld(e) if e.meld_type == MeldType::Chi && e.from == Some(0)));
        assert_eq!(stg.phase, Phase::AwaitingDiscard(1));
        assert!(stg.players[1].hand.contains(m4[0]));

        // 食い替え: 5萬と両面の反対側の2萬は捨てられない
        let pl = &stg.players[1];
        assert_eq!(pl.restricted, vec![Tile(TM, 5), Tile(TM, 2)]);
        let m2 = id(&stg, 1, "m2");
        assert!(matches!(
            stg.apply(1, Action::Discard(m2)),
            Err(Error::IllegalDiscard(_))
        ));
        assert!(!stg.legal_actions(1).contains(&Action::Discard(m2)));
        stg.apply(1, Action::Discard(m4[0])).unwrap();
        settle(&mut stg);
        assert!(stg.players[1].restricted.is_empty());
    }

    #[test]
    fn test_pon_beats_chi() {
        let hands = [
            "m111999p111999z1",
            "m34p234s234z33356",
            "m55p567s567z44467",
            "m22p88s99z7771122",
        ];
        let mut stg = setup(hands, "m5");
        stg.apply(0, Action::Draw).unwrap();
        let m5 = stg.players[0].drawn.unwrap();
        stg.apply(0, Action::Discard(m5)).unwrap();

        let chi = Action::chi(vec![id(&stg, 1, "m3"), id(&stg, 1, "m4")]);
        let pon = Action::pon(stg.players[2].hand.find_kind(Tile(TM, 5), 2));
        assert!(stg.legal_actions(1).contains(&chi));
        assert!(stg.legal_actions(2).contains(&pon));

        // 下家のチーは対面のポンを待つ
        assert!(stg.apply(1, chi).unwrap().is_empty());
        let events = stg.apply(2, pon).unwrap();
        assert!(matches!(&events[0], Event::Meld(e) if e.seat == 2 && e.meld_type == MeldType::Pon));
        assert_eq!(stg.phase, Phase::AwaitingDiscard(2));
        assert!(stg.players[1].hand.melds.is_empty());
        assert_eq!(stg.players[1].hand.size(), HAND_SIZE);
        assert_eq!(stg.players[2].restricted, vec![Tile(TM, 5)]);
    }

    #[test]
    fn test_minkan_beats_chi() {
        let hands = [
            "m111999p111999z1",
            "m34p234s234z33356",
            "m555p567s567z4446",
            "m22p88s99z7771122",
        ];
        let mut stg = setup_with_dead_wall(hands, "m0", "z5", "z1z2");
        stg.apply(0, Action::Draw).unwrap();
        let red = stg.players[0].drawn.unwrap();
        assert!(red.is_red5());
        stg.apply(0, Action::Discard(red)).unwrap();

        let chi = Action::chi(vec![id(&stg, 1, "m3"), id(&stg, 1, "m4")]);
        let kan = Action::kan(stg.players[2].hand.find_kind(Tile(TM, 5), 3));
        assert!(stg.legal_actions(2).contains(&kan));
        stg.apply(1, chi).unwrap();
        let events = stg.apply(2, kan).unwrap();

        // 大明槓 -> 新ドラ -> 嶺上牌のツモ
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Event::Meld(e) if e.meld_type == MeldType::Minkan && e.from == Some(0)));
        assert!(matches!(&events[1], Event::Dora(e) if e.tile.kind() == Tile(TZ, 2)));
        assert!(matches!(&events[2], Event::Deal(e) if e.seat == 2 && e.is_replacement && e.tile.kind() == Tile(TZ, 5)));

        assert_eq!(stg.phase, Phase::AwaitingDiscard(2));
        assert_eq!(stg.n_dora, 2);
        assert_eq!(stg.kan_count, 1);
        assert_eq!(stg.dead_wall.len(), DEAD_WALL_SIZE);
        assert_eq!(stg.wall_count(), LIVE_WALL_SIZE - 2);
        assert!(stg.players[0].discards[0].claimed);
        assert!(stg.players[1].hand.melds.is_empty());
        let pl = &stg.players[2];
        assert_eq!(pl.hand.melds[0].tiles.len(), 4);
        assert!(pl.restricted.is_empty());
        assert!(pl.is_rinshan);
        assert_eq!(pl.hand.size(), 14);
    }

    #[test]
    fn test_riichi_discard_same_kind() {
        let hands = ["m123456789p11s45", "", "", ""];
        let mut stg = setup(hands, "z1z2z3z4m1");
        stg.apply(0, Action::Draw).unwrap();
        let z1 = stg.players[0].drawn.unwrap();
        stg.apply(0, Action::Riichi(z1)).unwrap();
        settle(&mut stg);
        for s in 1..SEAT {
            tsumogiri(&mut stg, s);
        }

        // ツモ牌と同種の手牌の1萬は捨てられる
        stg.apply(0, Action::Draw).unwrap();
        let drawn = stg.players[0].drawn.unwrap();
        let m1 = id(&stg, 0, "m1");
        assert_ne!(m1, drawn);
        assert_eq!(m1.kind(), drawn.kind());
        assert!(stg.legal_actions(0).contains(&Action::Discard(m1)));
        let p1 = id(&stg, 0, "p1");
        assert!(stg.apply(0, Action::Discard(p1)).is_err());

        stg.apply(0, Action::Discard(m1)).unwrap();
        let d = stg.players[0].discards.last().unwrap();
        assert_eq!(d.tile, m1);
        assert!(!d.is_drawn);
        assert!(stg.players[0].hand.contains(drawn));
    }

    #[test]
    fn test_nagashimangan() {
        // 親のツモはすべて么九牌, 子のツモはすべて中張牌
        let ends = [
            "m1", "m9", "p1", "p9", "s1", "s9", "z1", "z2", "z3", "z4", "z5", "z6", "z7",
        ];
        let mut simples = vec![];
        for tp in ["m", "p", "s"] {
            for n in 2..=8 {
                simples.push(format!("{}{}", tp, n));
            }
        }
        let mut draws = String::new();
        for i in 0..LIVE_WALL_SIZE {
            if i % SEAT == 0 {
                draws += ends[(i / SEAT) % ends.len()];
            } else {
                draws += &simples[i % simples.len()];
            }
        }

        let mut stg = setup(["", "", "", ""], &draws);
        let mut last = vec![];
        while !stg.is_ended() {
            last = match stg.phase {
                Phase::AwaitingDraw(s) => stg.apply(s, Action::Draw).unwrap(),
                Phase::AwaitingDiscard(s) => {
                    let d = stg.players[s].drawn.unwrap();
                    stg.apply(s, Action::Discard(d)).unwrap()
                }
                _ => stg.resolve_calls().unwrap(),
            };
        }

        let expected = [true, false, false, false];
        assert!(matches!(
            &stg.phase,
            Phase::RoundEnded(EndReason::ExhaustiveDraw { nagashi, .. }) if *nagashi == expected
        ));
        assert!(last.iter().any(|ev| matches!(ev, Event::Draw(e) if e.nagashis == expected)));
        assert_eq!(stg.players[0].discards.len(), 18);
    }
}
